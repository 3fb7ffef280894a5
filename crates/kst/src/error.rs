use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid separator pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("syntax at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("document contains no records")]
    Empty,

    #[error("reader holds no valid document")]
    NoDocument,

    #[error("destination reader is already initialized")]
    AlreadyInitialized,

    #[error("no value at record {record}, value {value}")]
    OutOfRange { record: usize, value: usize },

    #[error("array with {0} elements cannot be read as a single value")]
    AmbiguousArray(usize),

    #[error("value is not an array")]
    NotAnArray,

    #[error("array element is itself an array of {0} elements")]
    NestedArray(usize),

    #[error("array element {0} is not an array")]
    NotATable(usize),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("number {0} does not fit the requested type")]
    NumberRange(i64),
}

pub type Result<T> = core::result::Result<T, Error>;
