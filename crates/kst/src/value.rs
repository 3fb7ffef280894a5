use crate::error::{Error, Result};
use crate::number::{parse_long, parse_real};

/// An ordered sequence of values, in source order.
pub type Record = Vec<Value>;

/// The records of a scanned document, in source order.
pub type Document = Vec<Record>;

/// A single datum of a record: accumulated text, or a bracketed array.
///
/// Values are stored exactly as scanned; typed reads interpret the text on
/// every call and never modify the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    pub(crate) text: String,
    pub(crate) array: Record,
}

impl Value {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            array: Vec::new(),
        }
    }

    pub fn from_array(array: Record) -> Self {
        Self {
            text: String::new(),
            array,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    /// `true` if the value was written as `[...]`, even when the brackets
    /// were empty.
    pub fn is_array(&self) -> bool {
        !self.array.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty() && self.text.is_empty()
    }

    /// `true` for `[]` and for values with neither text nor array.
    pub fn is_array_empty(&self) -> bool {
        match self.array.len() {
            0 => self.text.is_empty(),
            1 => self.array[0].is_empty(),
            _ => false,
        }
    }

    /// Read the value as a string. A one-element array reads as its element.
    pub fn read_string(&self) -> Result<String> {
        match self.array.len() {
            0 => Ok(self.text.clone()),
            1 => self.array[0].read_string(),
            n => Err(Error::AmbiguousArray(n)),
        }
    }

    pub fn read_long(&self) -> Result<i64> {
        let s = self.read_string()?.to_lowercase();
        parse_long(&s).ok_or(Error::InvalidNumber(s))
    }

    pub fn read_int(&self) -> Result<i32> {
        let l = self.read_long()?;
        i32::try_from(l).map_err(|_| Error::NumberRange(l))
    }

    pub fn read_real(&self) -> Result<f64> {
        let s = self.read_string()?.to_lowercase();
        parse_real(&s).ok_or(Error::InvalidNumber(s))
    }

    pub fn read_string_array(&self) -> Result<Vec<String>> {
        self.read_elements(Value::read_string)
    }

    pub fn read_int_array(&self) -> Result<Vec<i32>> {
        self.read_elements(Value::read_int)
    }

    pub fn read_long_array(&self) -> Result<Vec<i64>> {
        self.read_elements(Value::read_long)
    }

    pub fn read_real_array(&self) -> Result<Vec<f64>> {
        self.read_elements(Value::read_real)
    }

    fn read_elements<T>(&self, read: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
        if self.array.is_empty() {
            return Err(Error::NotAnArray);
        }
        // `[]` holds a single blank element
        if self.array.len() == 1 && self.array[0].is_empty() {
            return Ok(Vec::new());
        }
        self.array
            .iter()
            .map(|v| match v.array.len() {
                0 | 1 => read(v),
                n => Err(Error::NestedArray(n)),
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if self.array.is_empty() {
            serializer.serialize_str(&self.text)
        } else {
            serializer.collect_seq(&self.array)
        }
    }
}
