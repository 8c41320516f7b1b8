//! Error types for ADIF parsing and record construction.
//!
//! Parsing errors carry the byte offset into the buffer handed to
//! [`parse`](crate::parse), so a caller can point at the offending tag.
//!
//! ## Error Categories
//!
//! - **Malformed tags**: no `<`, no name delimiter, an unterminated tag, or a bad type section
//! - **Invalid lengths**: the length is not a non-negative decimal integer
//! - **Truncated values**: the buffer ends before the declared value length
//! - **Invalid names / type codes**: rejected when a record is built through the API
//!
//! ## Examples
//!
//! ```rust
//! use adif_record::{parse, Error};
//!
//! let err = parse(b"<call:abc>W1AW").unwrap_err();
//! assert!(matches!(err, Error::InvalidLength { .. }));
//! assert!(err.to_string().contains("abc"));
//! ```

use thiserror::Error;

/// Represents all possible errors raised while parsing or building ADIF records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A tag could not be located or its structure is broken
    #[error("Malformed tag at byte {offset}: {msg}")]
    MalformedTag { offset: usize, msg: String },

    /// The length section of a tag is not a valid non-negative integer
    #[error("Invalid length {found:?} for field '{field}' at byte {offset}")]
    InvalidLength {
        offset: usize,
        field: String,
        found: String,
    },

    /// The buffer ends before the declared value length is satisfied
    #[error(
        "Truncated value for field '{field}' at byte {offset}: declared {declared} bytes, {available} available"
    )]
    TruncatedValue {
        offset: usize,
        field: String,
        declared: usize,
        available: usize,
    },

    /// Field name that would break the tag grammar
    #[error("Invalid field name {0:?}: names must be non-empty and must not contain '<', ':' or '>'")]
    InvalidFieldName(String),

    /// Type code that cannot be written inside a tag
    #[error("Invalid type code {0:?}: expected a single printable ASCII character other than '>'")]
    InvalidTypeCode(char),
}

impl Error {
    /// Creates a malformed tag error at `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif_record::Error;
    ///
    /// let err = Error::malformed_tag(7, "missing '>'");
    /// assert!(err.to_string().contains("byte 7"));
    /// ```
    pub fn malformed_tag(offset: usize, msg: &str) -> Self {
        Error::MalformedTag {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid length error for `field`, keeping the rejected text.
    pub fn invalid_length(offset: usize, field: &str, found: &[u8]) -> Self {
        Error::InvalidLength {
            offset,
            field: field.to_string(),
            found: String::from_utf8_lossy(found).into_owned(),
        }
    }

    /// Creates a truncated value error.
    pub fn truncated_value(offset: usize, field: &str, declared: usize, available: usize) -> Self {
        Error::TruncatedValue {
            offset,
            field: field.to_string(),
            declared,
            available,
        }
    }

    /// Creates an invalid field name error.
    pub fn invalid_field_name(name: &str) -> Self {
        Error::InvalidFieldName(name.to_string())
    }

    /// Byte offset of a parse error, or `None` for construction errors.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::MalformedTag { offset, .. }
            | Error::InvalidLength { offset, .. }
            | Error::TruncatedValue { offset, .. } => Some(*offset),
            Error::InvalidFieldName(_) | Error::InvalidTypeCode(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
