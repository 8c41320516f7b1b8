//! The ADIF record type.
//!
//! [`Record`] maps lowercase field names to [`Value`]s. It wraps an [`IndexMap`] so
//! that fields keep the order they were parsed or set in, which makes serialization
//! deterministic. Equality ignores that order and compares records as mappings.
//!
//! ## Examples
//!
//! ```rust
//! use adif_record::{Record, TypeCode};
//!
//! let mut record = Record::new();
//! record.set("CALL", "W1AW").unwrap();
//! record.set_typed("qso_date", "20230101", TypeCode::DATE).unwrap();
//!
//! assert_eq!(record.get_str("call"), Some("W1AW"));
//! assert_eq!(record.serialize(), b"<call:4>W1AW<qso_date:8:D>20230101");
//! ```

use crate::format::{is_reserved, normalize_name};
use crate::ser::Serializer;
use crate::tokenizer::{Field, Tokenizer};
use crate::{AdifOptions, Error, Result, Value};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer as SerdeSerializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// A single ADIF record: uniquely named fields and their values.
///
/// # Examples
///
/// ```rust
/// use adif_record::Record;
///
/// let a = Record::parse(b"<CALL:4>W1AW<BAND:3>20m").unwrap();
/// let b = Record::parse(b"<band:3>20m <call:4>W1AW").unwrap();
///
/// // Equality is order-independent
/// assert_eq!(a, b);
///
/// // Iteration follows insertion order
/// let names: Vec<_> = a.names().cloned().collect();
/// assert_eq!(names, vec!["call", "band"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Record {
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Parses every field in `buf` into a new record.
    ///
    /// Whitespace between fields is ignored and an empty or blank buffer gives an empty
    /// record. When a name appears twice the later value wins and the field keeps its
    /// first position. Type codes are kept on the stored values.
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer error; no record is produced in that case.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let mut record = Record::new();
        let mut tokenizer = Tokenizer::new(buf);
        while let Some(field) = tokenizer.next_field()? {
            record.insert_field(field);
        }
        tracing::debug!(fields = record.len(), bytes = buf.len(), "parsed ADIF record");
        Ok(record)
    }

    /// Builds a record from name/value pairs, validating each name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldName`] for the first name that cannot be written
    /// inside a tag.
    pub fn from_fields<I, N, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        let iter = fields.into_iter();
        let mut record = Record::with_capacity(iter.size_hint().0);
        for (name, value) in iter {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    fn insert_field(&mut self, field: Field<'_>) {
        let value = field.to_value();
        match self.fields.entry(field.name) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(name = %entry.key(), "duplicate field, keeping later value");
                entry.insert(value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    /// Looks up a field by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(&*normalize_name(name))
    }

    /// Looks up a field and returns its value as `&str`.
    ///
    /// Returns `None` if the field is absent or its value is not UTF-8.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets a field, returning the previous value.
    ///
    /// The name is lowercased. Replacing a field keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldName`] if `name` is empty or contains `<`, `:` or `>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif_record::{Error, Record};
    ///
    /// let mut record = Record::new();
    /// assert_eq!(record.set("Band", "20m").unwrap(), None);
    /// assert!(record.set("band", "40m").unwrap().is_some());
    /// assert!(matches!(record.set("a:b", "x"), Err(Error::InvalidFieldName(_))));
    /// ```
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        validate_name(name)?;
        Ok(self
            .fields
            .insert(normalize_name(name).into_owned(), value.into()))
    }

    /// Sets a field carrying a type code.
    ///
    /// # Errors
    ///
    /// Same as [`Record::set`].
    pub fn set_typed(
        &mut self,
        name: &str,
        data: impl Into<Vec<u8>>,
        type_code: crate::TypeCode,
    ) -> Result<Option<Value>> {
        self.set(name, Value::typed(data, type_code))
    }

    /// Removes a field, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(&*normalize_name(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over the field names, in insertion order.
    pub fn names(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.fields.keys()
    }

    /// Returns an iterator over name/value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Serializes the record with default options: insertion order, no separator,
    /// type codes re-emitted.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        self.serialize_with(&AdifOptions::default())
    }

    #[must_use]
    pub fn serialize_with(&self, options: &AdifOptions) -> Vec<u8> {
        let mut serializer = Serializer::new(options.clone());
        serializer.write_record(self);
        serializer.into_inner()
    }

    /// Identity string for duplicate detection.
    ///
    /// Lowercase hex SHA-256 over the fields sorted by name, each written as an untyped
    /// tag `<name:len>value`. The result depends only on names and values: field order
    /// and type codes do not affect it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif_record::Record;
    ///
    /// let a = Record::parse(b"<call:4>W1AW<qso_date:8:D>20230101").unwrap();
    /// let b = Record::parse(b"<QSO_DATE:8>20230101 <CALL:4>W1AW").unwrap();
    /// assert_eq!(a.fingerprint(), b.fingerprint());
    /// assert_eq!(a.fingerprint().len(), 64);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        digest_fields(self.fields.iter().map(|(name, value)| (name.as_str(), value)))
    }

    /// Fingerprint restricted to the named fields.
    ///
    /// Names are matched case-insensitively; absent fields are skipped and repeated
    /// names count once. Useful for matching contacts on key fields such as call, date,
    /// time and band while ignoring confirmation status.
    #[must_use]
    pub fn fingerprint_of<I, S>(&self, names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected: Vec<(&str, &Value)> = names
            .into_iter()
            .filter_map(|name| {
                let key = normalize_name(name.as_ref());
                self.fields
                    .get_key_value(&*key)
                    .map(|(name, value)| (name.as_str(), value))
            })
            .collect();
        digest_fields(selected)
    }
}

fn digest_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut fields: Vec<(&str, &Value)> = fields.into_iter().collect();
    fields.sort_unstable_by(|a, b| a.0.cmp(b.0));
    fields.dedup_by(|a, b| a.0 == b.0);

    let mut canonical = Serializer::new(AdifOptions::new().with_type_codes(false));
    for (name, value) in fields {
        canonical.write_field_unchecked(name, value);
    }

    let mut hasher = Sha256::new();
    hasher.update(canonical.into_inner());
    hex::encode(hasher.finalize())
}

/// Checks that `name` can be written inside a tag.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.bytes().any(is_reserved) {
        return Err(Error::invalid_field_name(name));
    }
    Ok(())
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for Record {
    /// Serializes as a map of name to value; type codes are not included.
    /// Values that are not UTF-8 are written as bytes and read back as bytes.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: SerdeSerializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ADIF field names to string or byte values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Record, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = Record::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    record.set(&name, value).map_err(serde::de::Error::custom)?;
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeCode;

    #[test]
    fn test_parse_sample() {
        let record = Record::parse(b"<CALL:4>W1AW<QSO_DATE:8:D>20230101").unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_str("call"), Some("W1AW"));
        assert_eq!(record.get_str("qso_date"), Some("20230101"));
        assert_eq!(
            record.get("qso_date").and_then(Value::type_code),
            Some(TypeCode::DATE)
        );
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let record = Record::parse(b"<Call:4>W1AW").unwrap();
        assert_eq!(record.get_str("CALL"), Some("W1AW"));
        assert_eq!(record.get_str("cAlL"), Some("W1AW"));
        assert!(record.contains("call"));
        assert!(!record.contains("band"));
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let record = Record::parse(b"<call:4>W1AW<band:3>20m<CALL:5>K1ABC").unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_str("call"), Some("K1ABC"));
        let names: Vec<_> = record.names().cloned().collect();
        assert_eq!(names, vec!["call", "band"]);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(Record::parse(b"").unwrap().is_empty());
        assert!(Record::parse(b"  \r\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_is_atomic() {
        let err = Record::parse(b"<call:4>W1AW<band:10>20m").unwrap_err();
        assert!(matches!(err, Error::TruncatedValue { .. }));
    }

    #[test]
    fn test_set_validates_names() {
        let mut record = Record::new();
        for bad in ["", "a<b", "a:b", "a>b"] {
            assert_eq!(
                record.set(bad, "x").unwrap_err(),
                Error::InvalidFieldName(bad.to_string())
            );
        }
        assert!(record.is_empty());
    }

    #[test]
    fn test_set_normalizes_and_replaces() {
        let mut record = Record::new();
        record.set("CALL", "W1AW").unwrap();
        let old = record.set("call", "K1ABC").unwrap();
        assert_eq!(old, Some(Value::from("W1AW")));
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["call"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut record = Record::parse(b"<a:1>1<b:1>2<c:1>3").unwrap();
        assert_eq!(record.remove("B"), Some(Value::from("2")));
        assert_eq!(record.remove("b"), None);
        assert_eq!(record.serialize(), b"<a:1>1<c:1>3");
    }

    #[test]
    fn test_serialize_round_trip_with_types() {
        let record = Record::parse(b"<CALL:4>W1AW <QSO_DATE:8:D>20230101").unwrap();
        let bytes = record.serialize();
        assert_eq!(bytes, b"<call:4>W1AW<qso_date:8:D>20230101");
        assert_eq!(Record::parse(&bytes).unwrap(), record);
    }

    #[test]
    fn test_from_fields() {
        let record = Record::from_fields([("CALL", "W1AW"), ("band", "20m")]).unwrap();
        assert_eq!(record.get_str("call"), Some("W1AW"));
        assert!(Record::from_fields([("a:b", "x")]).is_err());
    }

    #[test]
    fn test_fingerprint_ignores_order_and_types() {
        let a = Record::parse(b"<call:4>W1AW<band:3>20m<qso_date:8:D>20230101").unwrap();
        let b = Record::parse(b"<qso_date:8>20230101<band:3>20m<call:4>W1AW").unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = Record::parse(b"<call:4>W1AW<band:3>40m<qso_date:8>20230101").unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_of_empty_record() {
        // SHA-256 of the empty string
        assert_eq!(
            Record::new().fingerprint(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_is_not_ambiguous_across_fields() {
        let a = Record::from_fields([("a", "bc"), ("d", "")]).unwrap();
        let b = Record::from_fields([("a", "b"), ("d", "c")]).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_of_subset() {
        let a = Record::parse(b"<call:4>W1AW<band:3>20m<qsl_rcvd:1>Y").unwrap();
        let b = Record::parse(b"<call:4>W1AW<band:3>20m<qsl_rcvd:1>N").unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(
            a.fingerprint_of(["CALL", "band", "call", "missing"]),
            b.fingerprint_of(["call", "band"])
        );
        assert_eq!(
            a.fingerprint_of(["call", "band"]),
            Record::parse(b"<band:3>20m<call:4>W1AW").unwrap().fingerprint()
        );
    }

    #[test]
    fn test_serde_bridge() {
        let record = Record::parse(b"<call:4>W1AW<qso_date:8:D>20230101").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"call":"W1AW","qso_date":"20230101"}"#);

        let back: Record = serde_json::from_str(r#"{"CALL":"W1AW","qso_date":"20230101"}"#).unwrap();
        assert_eq!(back.get_str("call"), Some("W1AW"));
        assert!(serde_json::from_str::<Record>(r#"{"a:b":"x"}"#).is_err());
    }

    #[test]
    fn test_serde_bridge_non_utf8_value() {
        let mut record = Record::new();
        record.set("blob", vec![0xff]).unwrap();
        record.set("call", "W1AW").unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"blob":[255],"call":"W1AW"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.get("blob").map(Value::as_bytes), Some(&[0xffu8][..]));
    }
}
