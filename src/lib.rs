//! # adif_record
//!
//! Parser and serializer for single ADIF (Amateur Data Interchange Format) records.
//!
//! ## What is ADIF?
//!
//! ADIF is the exchange format amateur radio logging programs use for contact (QSO)
//! records. A record is a run of tagged, length-prefixed fields:
//!
//! ```text
//! <CALL:4>W1AW<QSO_DATE:8:D>20230101<BAND:3>20m
//! ```
//!
//! The declared length is the only way to know where a value ends, so values may
//! contain `<`, `>`, `:` or whitespace. See [`format`] for the grammar.
//!
//! ## Key Features
//!
//! - **Length-driven tokenizer**: zero-copy, single pass, never scans inside values
//! - **Typed values**: `<NAME:LEN:T>` type codes are kept and written back
//! - **Deterministic output**: fields keep insertion order; sorted output on request
//! - **Fingerprints**: SHA-256 identity strings for duplicate detection
//! - **Precise errors**: every parse error carries a byte offset
//!
//! ## Quick Start
//!
//! ```rust
//! use adif_record::{parse, Record};
//!
//! let record = parse(b"<CALL:4>W1AW<QSO_DATE:8:D>20230101").unwrap();
//! assert_eq!(record.get_str("call"), Some("W1AW"));
//! assert_eq!(record.get_str("QSO_DATE"), Some("20230101"));
//!
//! let bytes = record.serialize();
//! assert_eq!(parse(&bytes).unwrap(), record);
//! ```
//!
//! ### Building Records
//!
//! ```rust
//! use adif_record::{adif, TypeCode, Value};
//!
//! let record = adif! {
//!     "call" => "K1ABC",
//!     "freq" => Value::typed("14.074", TypeCode::NUMBER),
//! }
//! .unwrap();
//! assert_eq!(record.serialize(), b"<call:5>K1ABC<freq:6:N>14.074");
//! ```
//!
//! ## Scope
//!
//! This crate works on one record held in memory. File headers, `<EOR>`-separated
//! streams, value coercion and I/O are left to the caller.
//!
//! ## Logging
//!
//! Parsing emits `tracing` events at `trace` (per field) and `debug` (per record,
//! duplicate fields). No subscriber is installed by the library.

pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod record;
pub mod ser;
pub mod tokenizer;
pub mod value;

pub use error::{Error, Result};
pub use options::{AdifOptions, FieldOrder, Separator};
pub use record::Record;
pub use ser::Serializer;
pub use tokenizer::{split_field, Field, Tokenizer};
pub use value::{TypeCode, Value};

/// Parse a buffer holding one record's fields.
///
/// # Examples
///
/// ```rust
/// use adif_record::parse;
///
/// let record = parse(b"<A:1>x   <B:1>y").unwrap();
/// assert_eq!(record.get_str("a"), Some("x"));
/// assert_eq!(record.get_str("b"), Some("y"));
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedTag`], [`Error::InvalidLength`] or
/// [`Error::TruncatedValue`] for the first field that cannot be read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(buf: &[u8]) -> Result<Record> {
    Record::parse(buf)
}

/// Parse a record from a string.
///
/// # Errors
///
/// Same as [`parse`]. Lengths count bytes, not characters.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(s: &str) -> Result<Record> {
    Record::parse(s.as_bytes())
}

/// Serialize a record with default options.
///
/// # Examples
///
/// ```rust
/// use adif_record::{parse, to_bytes};
///
/// let record = parse(b"<CALL:4>W1AW").unwrap();
/// assert_eq!(to_bytes(&record), b"<call:4>W1AW");
/// ```
#[must_use]
pub fn to_bytes(record: &Record) -> Vec<u8> {
    record.serialize()
}

/// Serialize a record with custom options.
#[must_use]
pub fn to_bytes_with_options(record: &Record, options: &AdifOptions) -> Vec<u8> {
    record.serialize_with(options)
}
