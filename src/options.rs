//! Configuration options for ADIF serialization.
//!
//! - [`AdifOptions`]: main configuration struct
//! - [`Separator`]: bytes written between fields
//! - [`FieldOrder`]: order in which fields are written
//!
//! ## Examples
//!
//! ```rust
//! use adif_record::{to_bytes_with_options, AdifOptions, FieldOrder, Record, Separator};
//!
//! let record = Record::parse(b"<CALL:4>W1AW<BAND:3>20m").unwrap();
//!
//! let options = AdifOptions::new()
//!     .with_separator(Separator::Space)
//!     .with_order(FieldOrder::Sorted);
//! assert_eq!(to_bytes_with_options(&record, &options), b"<band:3>20m <call:4>W1AW");
//! ```

/// Bytes written between consecutive fields.
///
/// Length prefixes make concatenation unambiguous, so [`Separator::None`] is valid
/// ADIF; the others only make output easier to read.
///
/// # Examples
///
/// ```rust
/// use adif_record::Separator;
///
/// assert_eq!(Separator::None.as_bytes(), b"");
/// assert_eq!(Separator::Space.as_bytes(), b" ");
/// assert_eq!(Separator::Newline.as_bytes(), b"\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    None,
    Space,
    Newline,
    CrLf,
}

impl Separator {
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Separator::None => b"",
            Separator::Space => b" ",
            Separator::Newline => b"\n",
            Separator::CrLf => b"\r\n",
        }
    }
}

/// Order in which a record's fields are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// The order fields were parsed or first set in.
    #[default]
    Insertion,
    /// Ascending by field name; byte-stable for equal records.
    Sorted,
}

/// Configuration options for ADIF serialization.
///
/// # Examples
///
/// ```rust
/// use adif_record::{AdifOptions, FieldOrder, Separator};
///
/// // Compact: no separator, insertion order, type codes kept
/// let options = AdifOptions::new();
/// assert!(options.emit_type_codes);
///
/// // One field per line, sorted by name
/// let options = AdifOptions::pretty();
/// assert_eq!(options.separator, Separator::Newline);
/// assert_eq!(options.order, FieldOrder::Sorted);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdifOptions {
    pub emit_type_codes: bool,
    pub separator: Separator,
    pub order: FieldOrder,
}

impl Default for AdifOptions {
    fn default() -> Self {
        AdifOptions {
            emit_type_codes: true,
            separator: Separator::default(),
            order: FieldOrder::default(),
        }
    }
}

impl AdifOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for readable output: one field per line, sorted by name.
    #[must_use]
    pub fn pretty() -> Self {
        AdifOptions {
            separator: Separator::Newline,
            order: FieldOrder::Sorted,
            ..Default::default()
        }
    }

    /// Whether typed values are written as `<name:len:T>`.
    ///
    /// When disabled every tag is written untyped, `<name:len>`, and type codes are lost
    /// on the next parse.
    #[must_use]
    pub fn with_type_codes(mut self, emit: bool) -> Self {
        self.emit_type_codes = emit;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: FieldOrder) -> Self {
        self.order = order;
        self
    }
}
