//! Stored field values.
//!
//! A [`Value`] is the raw bytes of a field plus the optional [`TypeCode`] read from its
//! tag. ADIF lengths count bytes, so values are byte strings; most are ASCII and
//! [`Value::as_str`] gives a `&str` view when the bytes are valid UTF-8.
//!
//! ## Examples
//!
//! ```rust
//! use adif_record::{TypeCode, Value};
//!
//! let call = Value::from("W1AW");
//! assert_eq!(call.as_str(), Some("W1AW"));
//! assert!(!call.has_type());
//!
//! let date = Value::typed("20230101", TypeCode::DATE);
//! assert_eq!(date.type_code(), Some(TypeCode::DATE));
//! assert_eq!(date.len(), 8);
//! ```

use crate::format::TAG_CLOSE;
use crate::{Error, Result};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single-byte ADIF data type indicator, as in `<QSO_DATE:8:D>`.
///
/// The byte is kept verbatim; no value coercion is attached to it.
///
/// # Examples
///
/// ```rust
/// use adif_record::TypeCode;
///
/// let code = TypeCode::new('d').unwrap();
/// assert_eq!(code.as_char(), 'd');
/// assert_eq!(code.to_ascii_uppercase(), TypeCode::DATE);
/// assert!(TypeCode::new('>').is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeCode(u8);

impl TypeCode {
    pub const AWARD_LIST: TypeCode = TypeCode(b'A');
    pub const BOOLEAN: TypeCode = TypeCode(b'B');
    pub const NUMBER: TypeCode = TypeCode(b'N');
    pub const DATE: TypeCode = TypeCode(b'D');
    pub const TIME: TypeCode = TypeCode(b'T');
    pub const STRING: TypeCode = TypeCode(b'S');
    pub const INTL_STRING: TypeCode = TypeCode(b'I');
    pub const MULTILINE_STRING: TypeCode = TypeCode(b'M');
    pub const INTL_MULTILINE_STRING: TypeCode = TypeCode(b'G');
    pub const ENUMERATION: TypeCode = TypeCode(b'E');
    pub const LOCATION: TypeCode = TypeCode(b'L');

    /// Creates a type code from a printable ASCII character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTypeCode`] for non-ASCII, whitespace or control
    /// characters, and for `>`, which would close the tag early.
    pub fn new(code: char) -> Result<Self> {
        if code.is_ascii_graphic() && code as u8 != TAG_CLOSE {
            Ok(TypeCode(code as u8))
        } else {
            Err(Error::InvalidTypeCode(code))
        }
    }

    /// Wraps a byte read from a tag. The tokenizer only passes printable ASCII
    /// other than `>`, the same set [`TypeCode::new`] accepts.
    pub(crate) const fn from_tag_byte(byte: u8) -> Self {
        TypeCode(byte)
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    #[must_use]
    pub const fn to_ascii_uppercase(self) -> TypeCode {
        TypeCode(self.0.to_ascii_uppercase())
    }

    /// Returns `true` for the indicators defined by the ADIF standard
    /// (case-insensitive).
    #[must_use]
    pub const fn is_standard(self) -> bool {
        matches!(
            self.0.to_ascii_uppercase(),
            b'A' | b'B' | b'N' | b'D' | b'T' | b'S' | b'I' | b'M' | b'G' | b'E' | b'L'
        )
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for TypeCode {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        TypeCode::new(code)
    }
}

/// The value of one field: raw bytes and an optional type code.
///
/// Equality compares both the bytes and the type code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Value {
    data: Vec<u8>,
    type_code: Option<TypeCode>,
}

impl Value {
    /// Creates an untyped value.
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Value {
            data: data.into(),
            type_code: None,
        }
    }

    /// Creates a value carrying a type code.
    #[must_use]
    pub fn typed(data: impl Into<Vec<u8>>, type_code: TypeCode) -> Self {
        Value {
            data: data.into(),
            type_code: Some(type_code),
        }
    }

    /// Returns the value bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the value as `&str` if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Byte length, which is what a tag declares.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn type_code(&self) -> Option<TypeCode> {
        self.type_code
    }

    #[must_use]
    pub fn has_type(&self) -> bool {
        self.type_code.is_some()
    }

    /// Replaces the type code, returning the previous one.
    pub fn set_type_code(&mut self, type_code: Option<TypeCode>) -> Option<TypeCode> {
        std::mem::replace(&mut self.type_code, type_code)
    }

    /// Returns the value with its type code removed.
    #[must_use]
    pub fn untyped(mut self) -> Self {
        self.type_code = None;
        self
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for Value {
    /// Writes the value lossily as UTF-8.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::new(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::new(s)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::new(bytes)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::new(bytes)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.data == other.as_bytes()
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl Serialize for Value {
    /// Serializes as a string when the bytes are UTF-8, otherwise as bytes.
    /// The type code is not part of this form.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(&self.data),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    /// Accepts a string, bytes, or a sequence of `u8`, the forms written by
    /// `Serialize`. The result is untyped.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or a byte array")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::new(v))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::new(v))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::new(v))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::new(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut data = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element::<u8>()? {
                    data.push(byte);
                }
                Ok(Value::new(data))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
