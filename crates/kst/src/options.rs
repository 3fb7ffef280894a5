use crate::decode::separator::Separator;
use crate::error::Result;

pub const DEFAULT_SEPARATOR: &str = ",";
pub const DEFAULT_TERMINATOR: &str = ";";

#[derive(Debug, Clone)]
pub struct Options {
    /// Delimiter between values of a record (default `,`)
    pub separator: Separator,
    /// Delimiter ending a record (default `;`)
    pub terminator: Separator,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            separator: Separator::fixed(DEFAULT_SEPARATOR),
            terminator: Separator::fixed(DEFAULT_TERMINATOR),
        }
    }
}

impl Options {
    /// Options from separator and terminator sources; see [`Separator::new`].
    pub fn new(separator: &str, terminator: &str) -> Result<Self> {
        Ok(Self {
            separator: Separator::new(separator)?,
            terminator: Separator::new(terminator)?,
        })
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_terminator(mut self, terminator: Separator) -> Self {
        self.terminator = terminator;
        self
    }
}
