//! Value separators and record terminators.

use regex::Regex;

use crate::error::Result;

/// A delimiter matched at an exact position of the input.
#[derive(Debug, Clone)]
pub enum Separator {
    /// Literal text.
    Fixed(String),
    /// A regular expression, anchored so that it only matches starting at
    /// the position being tested.
    Pattern { source: String, regex: Regex },
}

impl Separator {
    pub fn fixed(text: impl Into<String>) -> Self {
        Separator::Fixed(text.into())
    }

    pub fn pattern(source: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{source})"))?;
        Ok(Separator::Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// Build a separator from `source`, matching it literally when it has no
    /// regex meta characters.
    pub fn new(source: &str) -> Result<Self> {
        if regex::escape(source) == source {
            Ok(Self::fixed(source))
        } else {
            Self::pattern(source)
        }
    }

    /// Length in bytes of the match starting exactly at `pos`, if any.
    /// Empty matches do not count.
    #[inline]
    pub fn match_at(&self, text: &str, pos: usize) -> Option<usize> {
        let rest = text.get(pos..)?;
        match self {
            Separator::Fixed(s) => (!s.is_empty() && rest.starts_with(s.as_str())).then_some(s.len()),
            Separator::Pattern { regex, .. } => regex
                .find(rest)
                .map(|m| m.end())
                .filter(|&len| len > 0),
        }
    }

    pub fn pattern_str(&self) -> &str {
        match self {
            Separator::Fixed(s) => s,
            Separator::Pattern { source, .. } => source,
        }
    }
}

impl core::fmt::Display for Separator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.pattern_str())
    }
}
