//! JSON view of a scanned document.

use serde_json::Value as JsonValue;

use crate::reader::KstReader;
use crate::value::{Record, Value};

/// The document as an array of records, each an array of values. Values
/// written as `[...]` become arrays, everything else a string.
pub fn to_json(reader: &KstReader) -> JsonValue {
    JsonValue::Array(reader.records().iter().map(record_to_json).collect())
}

pub fn record_to_json(record: &Record) -> JsonValue {
    JsonValue::Array(record.iter().map(value_to_json).collect())
}

pub fn value_to_json(value: &Value) -> JsonValue {
    if value.is_array() {
        JsonValue::Array(value.array().iter().map(value_to_json).collect())
    } else {
        JsonValue::String(value.text().to_string())
    }
}

/// Serialize the document to a JSON string.
pub fn to_string(reader: &KstReader, pretty: bool) -> crate::Result<String> {
    let records = reader.records();
    let s = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(s)
}
