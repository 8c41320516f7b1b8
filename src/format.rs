//! ADIF Field Syntax
//!
//! This module documents the subset of the ADIF format handled by this library and
//! holds the structural bytes shared by the tokenizer and the serializer.
//!
//! # Overview
//!
//! An ADIF record is a run of fields. Each field is a tag followed by its value:
//!
//! ```text
//! <CALL:4>W1AW<QSO_DATE:8:D>20230101 <BAND:3>20m
//! ```
//!
//! The grammar:
//!
//! ```text
//! record     := field*
//! field      := "<" name ":" length (":" typecode)? ">" value
//! name       := identifier, case-insensitive, normalized to lowercase
//! length     := non-negative decimal integer, the byte length of value
//! typecode   := single character
//! value      := exactly <length> bytes, any content
//! ```
//!
//! # Length-driven boundaries
//!
//! There is no delimiter after a value. The only way to find where a value ends is the
//! declared length, so values may contain `<`, `>`, `:` or line breaks:
//!
//! ```text
//! <COMMENT:8>a<b>:c d<CALL:4>W1AW
//! ```
//!
//! parses as `comment = "a<b>:c d"` and `call = "W1AW"`. A wrong length silently shifts
//! every later field, so the tokenizer never looks inside a value for tag syntax.
//!
//! # Whitespace
//!
//! Whitespace (space, tab, CR, LF, vertical tab, form feed) between fields is
//! insignificant and skipped.
//! Whitespace inside a value, within its declared length, is kept verbatim.
//!
//! # Type codes
//!
//! | Code | ADIF data type |
//! |------|----------------|
//! | `A` | AwardList |
//! | `B` | Boolean |
//! | `N` | Number |
//! | `D` | Date (`YYYYMMDD`) |
//! | `T` | Time (`HHMMSS`) |
//! | `S` | String |
//! | `I` | IntlString |
//! | `M` | MultilineString |
//! | `G` | IntlMultilineString |
//! | `E` | Enumeration |
//! | `L` | Location |
//!
//! Type codes are carried as metadata only; values are never coerced.
//!
//! # Not covered
//!
//! File headers (`<EOH>`) and record terminators (`<EOR>`) belong to multi-record
//! files and are outside this library. A bare `<EOR>` tag fails to parse because it has
//! no length section.

use std::borrow::Cow;

/// Opens a tag.
pub const TAG_OPEN: u8 = b'<';

/// Closes a tag.
pub const TAG_CLOSE: u8 = b'>';

/// Separates name, length and type code inside a tag.
pub const TAG_SEPARATOR: u8 = b':';

/// Bytes skipped between fields.
#[inline]
#[must_use]
pub const fn is_field_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Returns `true` if `byte` would end or split a tag when written inside a field name.
#[inline]
#[must_use]
pub const fn is_reserved(byte: u8) -> bool {
    byte == TAG_OPEN || byte == TAG_CLOSE || byte == TAG_SEPARATOR
}

/// Lowercases a field name, borrowing when it is already lowercase.
#[must_use]
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    if name.is_ascii() && !name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.to_lowercase())
    }
}
