//! ADIF serialization.
//!
//! This module provides the [`Serializer`] that writes fields as length-prefixed tags.
//! Each field becomes `<name:len>value`, or `<name:len:T>value` for typed values, where
//! `len` is the byte length of the value. Output parses back to an equal
//! [`Record`](crate::Record).
//!
//! ## Usage
//!
//! Most users should call [`Record::serialize`](crate::Record::serialize) or
//! [`to_bytes`](crate::to_bytes). For streaming fields without building a record:
//!
//! ```rust
//! use adif_record::{AdifOptions, Serializer, TypeCode, Value};
//!
//! let mut serializer = Serializer::new(AdifOptions::new());
//! serializer.write_field("call", &Value::from("W1AW")).unwrap();
//! serializer
//!     .write_field("qso_date", &Value::typed("20230101", TypeCode::DATE))
//!     .unwrap();
//!
//! assert_eq!(serializer.into_inner(), b"<call:4>W1AW<qso_date:8:D>20230101");
//! ```

use crate::format::{TAG_CLOSE, TAG_OPEN, TAG_SEPARATOR};
use crate::options::FieldOrder;
use crate::record::validate_name;
use crate::{AdifOptions, Record, Result, Value};

/// The ADIF serializer.
///
/// Accumulates tags into an internal buffer. Created via [`Serializer::new`].
pub struct Serializer {
    output: Vec<u8>,
    options: AdifOptions,
    fields_written: usize,
}

impl Serializer {
    pub fn new(options: AdifOptions) -> Self {
        Serializer {
            output: Vec::with_capacity(256),
            options,
            fields_written: 0,
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    /// Number of fields written so far.
    #[must_use]
    pub fn fields_written(&self) -> usize {
        self.fields_written
    }

    /// Writes one field. The name is written as given, without lowercasing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldName`](crate::Error::InvalidFieldName) if `name` is
    /// empty or contains `<`, `:` or `>`. Nothing is written in that case.
    pub fn write_field(&mut self, name: &str, value: &Value) -> Result<()> {
        validate_name(name)?;
        self.write_field_unchecked(name, value);
        Ok(())
    }

    /// Writes every field of `record` in the configured order.
    pub fn write_record(&mut self, record: &Record) {
        match self.options.order {
            FieldOrder::Insertion => {
                for (name, value) in record {
                    self.write_field_unchecked(name, value);
                }
            }
            FieldOrder::Sorted => {
                let mut fields: Vec<_> = record.iter().collect();
                fields.sort_unstable_by(|a, b| a.0.cmp(b.0));
                for (name, value) in fields {
                    self.write_field_unchecked(name, value);
                }
            }
        }
    }

    /// Names stored in a `Record` are validated on insertion.
    pub(crate) fn write_field_unchecked(&mut self, name: &str, value: &Value) {
        if self.fields_written > 0 {
            self.output.extend_from_slice(self.options.separator.as_bytes());
        }

        let length = value.len().to_string();
        self.output.reserve(name.len() + length.len() + value.len() + 5);
        self.output.push(TAG_OPEN);
        self.output.extend_from_slice(name.as_bytes());
        self.output.push(TAG_SEPARATOR);
        self.output.extend_from_slice(length.as_bytes());
        if self.options.emit_type_codes {
            if let Some(code) = value.type_code() {
                self.output.push(TAG_SEPARATOR);
                self.output.push(code.as_byte());
            }
        }
        self.output.push(TAG_CLOSE);
        self.output.extend_from_slice(value.as_bytes());

        self.fields_written += 1;
    }
}
