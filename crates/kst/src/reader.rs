//! Cursor-based access to a scanned document.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::decode::scanner::scan;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::value::{Document, Record, Value};

/// Decode `bytes` as UTF-8, replacing invalid sequences, with `\r\n`
/// folded to `\n`.
pub fn normalize_text(bytes: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        text if text.contains("\r\n") => Cow::Owned(text.replace("\r\n", "\n")),
        text => text,
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Uninitialized,
    Invalid(Error),
    Valid(Document),
}

/// A document of records plus a `(record, value)` cursor.
///
/// Readers produced by [`KstReader::read_array`] and
/// [`KstReader::read_table`] own a copy of the extracted values and are
/// independent of the reader they came from.
#[derive(Debug, Default)]
pub struct KstReader {
    state: State,
    record: usize,
    value: usize,
}

impl KstReader {
    /// An uninitialized reader, suitable as the destination of
    /// [`read_array`](Self::read_array) or [`read_table`](Self::read_table).
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `input` with the default `,` separator and `;` terminator.
    pub fn from_text(input: &str) -> Self {
        Self::from_str_with(input, &Options::default())
    }

    /// Scan `input`. A malformed document produces an invalid reader whose
    /// diagnostic is available from [`error`](Self::error).
    pub fn from_str_with(input: &str, options: &Options) -> Self {
        let state = match scan(input, options) {
            Ok(records) => State::Valid(records),
            Err(e) => State::Invalid(e),
        };
        Self::with_state(state)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::from_path_with(path, &Options::default())
    }

    /// Read a file as UTF-8 and scan it. Invalid byte sequences become
    /// U+FFFD and line endings are normalized to `\n`.
    pub fn from_path_with(path: impl AsRef<Path>, options: &Options) -> Self {
        match fs::read(path) {
            Ok(bytes) => Self::from_str_with(&normalize_text(&bytes), options),
            Err(e) => Self::with_state(State::Invalid(Error::Io(e))),
        }
    }

    /// Wrap a single record as a one-record document.
    pub fn from_record(record: Record) -> Self {
        Self::with_state(State::Valid(vec![record]))
    }

    pub fn from_records(records: Document) -> Self {
        Self::with_state(State::Valid(records))
    }

    fn with_state(state: State) -> Self {
        Self {
            state,
            record: 0,
            value: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, State::Valid(_))
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self.state, State::Uninitialized)
    }

    /// Why construction failed, for an invalid reader.
    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            State::Invalid(e) => Some(e),
            _ => None,
        }
    }

    pub fn records(&self) -> &[Record] {
        match &self.state {
            State::Valid(records) => records,
            _ => &[],
        }
    }

    pub fn into_records(self) -> Option<Document> {
        match self.state {
            State::Valid(records) => Some(records),
            _ => None,
        }
    }

    /// Number of records; 0 for an invalid reader.
    pub fn record_count(&self) -> usize {
        self.records().len()
    }

    /// Number of values in the current record, `None` at end of file.
    pub fn value_count(&self) -> Option<usize> {
        self.value_count_at(self.record)
    }

    pub fn value_count_at(&self, record: usize) -> Option<usize> {
        self.records().get(record).map(Vec::len)
    }

    pub fn current_record(&self) -> usize {
        self.record
    }

    pub fn current_value(&self) -> usize {
        self.value
    }

    pub fn next_value(&mut self) -> bool {
        if self.is_end_of_record() {
            return false;
        }
        self.value += 1;
        true
    }

    pub fn next_record(&mut self) -> bool {
        if self.is_end_of_file() {
            return false;
        }
        self.record += 1;
        self.value = 0;
        true
    }

    /// Move the cursor to an existing value. On failure the cursor is left
    /// where it was.
    pub fn seek(&mut self, record: usize, value: usize) -> bool {
        if self.is_end_of_file_at(record) || self.is_end_of_record_at(value, record) {
            return false;
        }
        self.record = record;
        self.value = value;
        true
    }

    pub fn is_end_of_record(&self) -> bool {
        self.is_end_of_record_at(self.value, self.record)
    }

    pub fn is_end_of_record_at(&self, value: usize, record: usize) -> bool {
        value >= self.value_count_at(record).unwrap_or(0)
    }

    pub fn is_end_of_file(&self) -> bool {
        self.is_end_of_file_at(self.record)
    }

    pub fn is_end_of_file_at(&self, record: usize) -> bool {
        record >= self.record_count()
    }

    pub fn is_value_empty(&self) -> bool {
        self.is_value_empty_at(self.value, self.record)
    }

    /// `true` if the value is blank, or if there is no such value.
    pub fn is_value_empty_at(&self, value: usize, record: usize) -> bool {
        self.value_at(value, record).map_or(true, Value::is_empty)
    }

    pub fn is_array_empty(&self) -> bool {
        self.is_array_empty_at(self.value, self.record)
    }

    /// `true` for `[]`, for blank values, and if there is no such value.
    pub fn is_array_empty_at(&self, value: usize, record: usize) -> bool {
        self.value_at(value, record).map_or(true, Value::is_array_empty)
    }

    /// The value under the cursor.
    pub fn value(&self) -> Result<&Value> {
        self.value_at(self.value, self.record)
    }

    pub fn value_at(&self, value: usize, record: usize) -> Result<&Value> {
        let State::Valid(records) = &self.state else {
            return Err(Error::NoDocument);
        };
        records
            .get(record)
            .and_then(|r| r.get(value))
            .ok_or(Error::OutOfRange { record, value })
    }

    pub fn read_string(&self) -> Result<String> {
        self.value()?.read_string()
    }

    pub fn read_int(&self) -> Result<i32> {
        self.value()?.read_int()
    }

    pub fn read_long(&self) -> Result<i64> {
        self.value()?.read_long()
    }

    pub fn read_real(&self) -> Result<f64> {
        self.value()?.read_real()
    }

    pub fn read_string_array(&self) -> Result<Vec<String>> {
        self.value()?.read_string_array()
    }

    pub fn read_int_array(&self) -> Result<Vec<i32>> {
        self.value()?.read_int_array()
    }

    pub fn read_long_array(&self) -> Result<Vec<i64>> {
        self.value()?.read_long_array()
    }

    pub fn read_real_array(&self) -> Result<Vec<f64>> {
        self.value()?.read_real_array()
    }

    /// Load the array under the cursor into `out` as a one-record document.
    pub fn read_array(&self, out: &mut KstReader) -> Result<()> {
        self.read_array_at(out, self.value, self.record)
    }

    pub fn read_array_at(&self, out: &mut KstReader, value: usize, record: usize) -> Result<()> {
        if out.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        let v = self.value_at(value, record)?;
        if !v.is_array() {
            return Err(Error::NotAnArray);
        }
        *out = KstReader::from_record(v.array.clone());
        Ok(())
    }

    /// Load the array of arrays under the cursor into `out`, one record per
    /// element.
    pub fn read_table(&self, out: &mut KstReader) -> Result<()> {
        self.read_table_at(out, self.value, self.record)
    }

    pub fn read_table_at(&self, out: &mut KstReader, value: usize, record: usize) -> Result<()> {
        if out.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        let v = self.value_at(value, record)?;
        if !v.is_array() {
            return Err(Error::NotAnArray);
        }
        let rows = v
            .array
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if row.is_array() {
                    Ok(row.array.clone())
                } else {
                    Err(Error::NotATable(i))
                }
            })
            .collect::<Result<Document>>()?;
        *out = KstReader::from_records(rows);
        Ok(())
    }

    pub fn array_reader(&self) -> Result<KstReader> {
        let mut out = KstReader::new();
        self.read_array(&mut out)?;
        Ok(out)
    }

    pub fn table_reader(&self) -> Result<KstReader> {
        let mut out = KstReader::new();
        self.read_table(&mut out)?;
        Ok(out)
    }
}
