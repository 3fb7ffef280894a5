use std::sync::LazyLock;

use crate::decode::separator::Separator;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::value::{Document, Record, Value};

static ARRAY_TERMINATOR: LazyLock<Separator> = LazyLock::new(|| Separator::fixed("]"));

/// Deepest `[` nesting accepted before the input is rejected.
pub const MAX_DEPTH: usize = 256;

/// Scan `input` into records.
///
/// Fails if the input is empty, if any record is malformed, or if no record
/// was produced at all.
pub fn scan(input: &str, options: &Options) -> Result<Document> {
    if input.is_empty() {
        return Err(Error::Empty);
    }
    let mut scanner = Scanner::new(input, &options.separator);
    let mut records = Vec::new();
    while !scanner.at_end() {
        let record = scanner.read_record(&options.terminator)?;
        if !record.is_empty() {
            records.push(record);
            scanner.have_records = true;
        }
    }
    if records.is_empty() {
        return Err(Error::Empty);
    }
    Ok(records)
}

pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    separator: &'a Separator,
    have_records: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, separator: &'a Separator) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            separator,
            have_records: false,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.input[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> Error {
        let before = &self.input[..pos.min(self.input.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Error::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Read one record, up to and including `terminator`.
    ///
    /// Running out of input is only accepted when nothing but whitespace or
    /// comments followed the previous record; the returned record is then
    /// empty.
    pub fn read_record(&mut self, terminator: &'a Separator) -> Result<Record> {
        let mut record = Record::new();
        let mut value = Value::default();

        let mut accept_string = true;
        let mut accept_value = true;
        let mut accept_array = true;

        while !self.at_end() {
            if let Some(len) = terminator.match_at(self.input, self.pos) {
                self.pos += len;
                record.push(value);
                return Ok(record);
            }

            if let Some(len) = self.separator.match_at(self.input, self.pos) {
                self.pos += len;
                record.push(core::mem::take(&mut value));
                accept_string = true;
                accept_value = true;
                accept_array = true;
                continue;
            }

            let start = self.pos;
            let Some(c) = self.bump() else {
                break;
            };

            if c.is_whitespace() {
                accept_string = true;
                continue;
            }

            if c == '#' {
                self.skip_comment()?;
                continue;
            }

            if accept_array && c == '[' {
                if self.depth >= MAX_DEPTH {
                    return Err(self.error_at(start, "arrays nested too deeply"));
                }
                self.depth += 1;
                value.array = self.read_record(&ARRAY_TERMINATOR)?;
                self.depth -= 1;
                if value.array.is_empty() {
                    return Err(self.error_at(
                        self.pos,
                        "end of input while looking for record terminator \"]\"",
                    ));
                }
                accept_value = false;
                accept_array = false;
                continue;
            }

            if !accept_value {
                return Err(self.error_at(start, "value not expected after array"));
            }

            if accept_string && c == '"' {
                self.read_string(start, &mut value.text)?;
                accept_array = false;
                continue;
            }

            accept_string = false;
            accept_array = false;
            value.text.push(c);
        }

        if accept_value && record.is_empty() && value.text.is_empty() && self.have_records {
            return Ok(record);
        }

        Err(self.error_at(
            self.pos,
            format!("end of input while looking for record terminator {terminator}"),
        ))
    }

    /// Read a quoted string whose opening quote is at `start`.
    #[cfg(not(feature = "perf_memchr"))]
    fn read_string(&mut self, start: usize, out: &mut String) -> Result<()> {
        while let Some(c) = self.bump() {
            match c {
                '\\' => self.read_escape(out)?,
                '"' => return Ok(()),
                _ => out.push(c),
            }
        }
        Err(self.error_at(start, "end of input while looking for string terminator '\"'"))
    }

    #[cfg(feature = "perf_memchr")]
    fn read_string(&mut self, start: usize, out: &mut String) -> Result<()> {
        loop {
            let rest = &self.input.as_bytes()[self.pos..];
            let Some(rel) = memchr::memchr2(b'"', b'\\', rest) else {
                self.pos = self.input.len();
                return Err(
                    self.error_at(start, "end of input while looking for string terminator '\"'")
                );
            };
            out.push_str(&self.input[self.pos..self.pos + rel]);
            let special = rest[rel];
            self.pos += rel + 1;
            match special {
                b'"' => return Ok(()),
                _ => self.read_escape(out)?,
            }
        }
    }

    /// The backslash has been consumed; take the escaped character. An
    /// escaped newline continues the line and contributes nothing.
    fn read_escape(&mut self, out: &mut String) -> Result<()> {
        let at = self.pos;
        match self.bump() {
            None => Err(self.error_at(at, "escape character at end of input")),
            Some('\n') => Ok(()),
            Some(c) => {
                out.push(c);
                Ok(())
            }
        }
    }

    #[cfg(not(feature = "perf_memchr"))]
    fn skip_comment(&mut self) -> Result<()> {
        while let Some(c) = self.bump() {
            if c == '\n' {
                return Ok(());
            }
        }
        Err(self.error_at(
            self.pos,
            "end of input while looking for end of line following comment",
        ))
    }

    #[cfg(feature = "perf_memchr")]
    fn skip_comment(&mut self) -> Result<()> {
        match memchr::memchr(b'\n', &self.input.as_bytes()[self.pos..]) {
            Some(rel) => {
                self.pos += rel + 1;
                Ok(())
            }
            None => {
                self.pos = self.input.len();
                Err(self.error_at(
                    self.pos,
                    "end of input while looking for end of line following comment",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(record: &Record) -> Vec<&str> {
        record.iter().map(Value::text).collect()
    }

    #[test]
    fn scans_values_and_records() {
        let records = scan("a, b; c;", &Options::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(texts(&records[0]), vec!["a", "b"]);
        assert_eq!(texts(&records[1]), vec!["c"]);
    }

    #[test]
    fn nested_arrays_become_sub_records() {
        let records = scan("[1, [2, 3]];", &Options::default()).unwrap();
        let outer = &records[0][0];
        assert_eq!(outer.array().len(), 2);
        assert_eq!(outer.array()[0].text(), "1");
        assert_eq!(texts(&outer.array()[1].array), vec!["2", "3"]);
    }

    #[test]
    fn reports_location_of_errors() {
        let err = scan("1;\n[2] x;", &Options::default()).unwrap_err();
        match err {
            Error::Syntax { line, column, message } => {
                assert_eq!(line, 2);
                assert_eq!(column, 5);
                assert!(message.contains("after array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let input = format!("{};", "[".repeat(MAX_DEPTH + 1));
        let err = scan(&input, &Options::default()).unwrap_err();
        assert!(err.to_string().contains("too deeply"));
    }

    #[test]
    fn escape_at_end_of_input_is_an_error() {
        let err = scan("\"\\", &Options::default()).unwrap_err();
        assert!(err.to_string().contains("escape"));
    }

    #[test]
    fn comment_without_newline_is_an_error() {
        let err = scan("1; # trailing", &Options::default()).unwrap_err();
        assert!(err.to_string().contains("comment"));
    }
}
