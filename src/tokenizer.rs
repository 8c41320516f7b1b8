//! ADIF field tokenizer.
//!
//! This module splits a byte buffer into [`Field`]s. It is the only place that reads
//! tag syntax; everything else in the crate works on tokenized fields.
//!
//! ## Overview
//!
//! - **Length-driven**: a value's end is found from its declared length, never by
//!   scanning for the next `<`
//! - **Zero-copy**: field values borrow from the input buffer
//! - **Single pass**: each byte of the input is inspected a bounded number of times
//! - **Error reporting**: every error carries the byte offset into the input
//!
//! ## Usage
//!
//! ```rust
//! use adif_record::{split_field, TypeCode};
//!
//! let (field, rest) = split_field(b"<QSO_DATE:8:D>20230101  <CALL:4>W1AW").unwrap();
//! assert_eq!(field.name, "qso_date");
//! assert_eq!(field.value, b"20230101");
//! assert_eq!(field.type_code, Some(TypeCode::DATE));
//! assert_eq!(rest, b"<CALL:4>W1AW");
//! ```
//!
//! The [`Tokenizer`] iterator repeats this until the buffer is exhausted:
//!
//! ```rust
//! use adif_record::Tokenizer;
//!
//! let names: Vec<String> = Tokenizer::new(b"<A:1>x <B:0>")
//!     .map(|field| field.map(|f| f.name))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(names, vec!["a", "b"]);
//! ```

use crate::format::{is_field_whitespace, normalize_name, TAG_CLOSE, TAG_OPEN, TAG_SEPARATOR};
use crate::{Error, Result, TypeCode, Value};
use tracing::trace;

/// One tokenized field.
///
/// `name` is lowercased; `value` borrows exactly the declared number of bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: String,
    pub value: &'a [u8],
    pub type_code: Option<TypeCode>,
}

impl<'a> Field<'a> {
    /// Returns `true` if the tag carried a type code (`<name:len:T>`).
    #[must_use]
    pub fn has_type(&self) -> bool {
        self.type_code.is_some()
    }

    /// Returns the value as `&str` if it is valid UTF-8.
    #[must_use]
    pub fn value_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }

    /// Copies the value out of the input buffer, keeping the type code.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self.type_code {
            Some(code) => Value::typed(self.value, code),
            None => Value::new(self.value),
        }
    }
}

/// Reads the first field of `buf` and returns it with the unconsumed tail.
///
/// Bytes before the first `<` are skipped. Leading whitespace is removed from the tail,
/// so the tail is either empty or the start of the next field.
///
/// # Errors
///
/// - [`Error::MalformedTag`] if no tag can be found or its structure is broken
/// - [`Error::InvalidLength`] if the length is not a non-negative decimal integer
/// - [`Error::TruncatedValue`] if `buf` ends before the declared length
///
/// Offsets in errors are relative to `buf`.
pub fn split_field(buf: &[u8]) -> Result<(Field<'_>, &[u8])> {
    let mut tokenizer = Tokenizer::new(buf);
    let field = tokenizer.read_field()?;
    tokenizer.skip_whitespace();
    Ok((field, tokenizer.remaining()))
}

/// Iterator over the fields of a buffer.
///
/// Whitespace between fields is skipped. After the first error the iterator
/// yields `None`.
pub struct Tokenizer<'a> {
    input: &'a [u8],
    position: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            input,
            position: 0,
            failed: false,
        }
    }

    /// Byte offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed part of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.position..]
    }

    /// Reads the next field, or `None` once only whitespace remains.
    ///
    /// # Errors
    ///
    /// See [`split_field`]. Offsets are relative to the buffer given to
    /// [`Tokenizer::new`].
    pub fn next_field(&mut self) -> Result<Option<Field<'a>>> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }
        self.read_field().map(Some)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && is_field_whitespace(self.input[self.position]) {
            self.position += 1;
        }
    }

    /// Absolute index of the first `byte` in `input[from..to]`.
    fn find_byte(&self, from: usize, to: usize, byte: u8) -> Option<usize> {
        self.input[from..to]
            .iter()
            .position(|&b| b == byte)
            .map(|i| from + i)
    }

    fn read_field(&mut self) -> Result<Field<'a>> {
        let start = self.position;
        let end = self.input.len();

        let open = self
            .find_byte(start, end, TAG_OPEN)
            .ok_or_else(|| Error::malformed_tag(start, "expected '<' to open a tag"))?;
        if open > start {
            trace!(skipped = open - start, offset = start, "skipping bytes before tag");
        }

        let name_end = self
            .find_byte(open + 1, end, TAG_SEPARATOR)
            .ok_or_else(|| Error::malformed_tag(open, "expected ':' after field name"))?;
        let name = parse_name(open, &self.input[open + 1..name_end])?;

        let length_start = name_end + 1;
        let close = self
            .find_byte(length_start, end, TAG_CLOSE)
            .ok_or_else(|| Error::malformed_tag(open, "unterminated tag, expected '>'"))?;

        // `<name:len>` or `<name:len:T>`
        let (length_end, type_code) = match self.find_byte(length_start, close, TAG_SEPARATOR) {
            Some(separator) => {
                let code = &self.input[separator + 1..close];
                if code.len() != 1 {
                    return Err(Error::malformed_tag(
                        separator + 1,
                        "type code must be a single character",
                    ));
                }
                if !code[0].is_ascii_graphic() {
                    return Err(Error::malformed_tag(
                        separator + 1,
                        "type code must be a printable ASCII character",
                    ));
                }
                (separator, Some(TypeCode::from_tag_byte(code[0])))
            }
            None => (close, None),
        };
        let length = parse_length(length_start, &name, &self.input[length_start..length_end])?;

        let value_start = close + 1;
        let available = end - value_start;
        if length > available {
            return Err(Error::truncated_value(value_start, &name, length, available));
        }
        let value = &self.input[value_start..value_start + length];
        self.position = value_start + length;
        debug_assert!(self.position > start);

        trace!(
            name = %name,
            length,
            type_code = ?type_code.map(TypeCode::as_char),
            "tokenized field"
        );

        Ok(Field {
            name,
            value,
            type_code,
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Field<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_field() {
            Ok(field) => field.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

fn parse_name(open: usize, raw: &[u8]) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::malformed_tag(open, "empty field name"));
    }
    if raw.iter().any(|&b| b == TAG_OPEN || b == TAG_CLOSE) {
        return Err(Error::malformed_tag(
            open,
            "field name contains '<' or '>', a tag is missing its length",
        ));
    }
    let name = std::str::from_utf8(raw)
        .map_err(|_| Error::malformed_tag(open, "field name is not valid UTF-8"))?;
    Ok(normalize_name(name).into_owned())
}

fn parse_length(offset: usize, field: &str, raw: &[u8]) -> Result<usize> {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) {
        return Err(Error::invalid_length(offset, field, raw));
    }
    // Only ASCII digits remain, so the sole failure left is overflow.
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| Error::invalid_length(offset, field, raw))
}
