//! Reader for KST record literals.
//!
//! A KST document is a sequence of records terminated by `;`, each holding
//! values separated by `,`. Values are bare or quoted text, or bracketed
//! arrays that nest like records:
//!
//! ```text
//! # name, position, samples
//! "probe 1", 55d12'9.21"n, [0x1f, 12e3, 1.5];
//! ```
//!
//! Values are kept as text and interpreted on demand by the typed reads,
//! which understand bases 2 to 36, hexadecimal, exponents and
//! degree/minute/second arc lengths (see [`number`]).
//!
//! ```
//! let reader = kst::KstReader::from_text("[1];");
//! assert_eq!(reader.read_int().unwrap(), 1);
//! ```

pub mod decode;
pub mod error;
#[cfg(feature = "json")]
pub mod json;
pub mod number;
pub mod options;
pub mod reader;
pub mod value;

pub use crate::decode::separator::Separator;
pub use crate::error::{Error, Result};
pub use crate::number::{parse_long, parse_real};
pub use crate::options::Options;
pub use crate::reader::KstReader;
pub use crate::value::{Document, Record, Value};

use std::io::Read;

/// Scan `input`, failing with the scan diagnostic instead of producing an
/// invalid reader.
pub fn read_from_str(input: &str, options: &Options) -> Result<KstReader> {
    let records = crate::decode::scanner::scan(input, options)?;
    Ok(KstReader::from_records(records))
}

pub fn read_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<KstReader> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    read_from_str(&s, options)
}
