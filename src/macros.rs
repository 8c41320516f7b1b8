/// Builds a [`Record`](crate::Record) from `name => value` pairs.
///
/// Expands to a `Result<Record>` so that invalid field names surface as
/// [`Error::InvalidFieldName`](crate::Error::InvalidFieldName).
///
/// ```rust
/// use adif_record::{adif, TypeCode, Value};
///
/// let record = adif! {
///     "CALL" => "W1AW",
///     "qso_date" => Value::typed("20230101", TypeCode::DATE),
/// }
/// .unwrap();
/// assert_eq!(record.get_str("call"), Some("W1AW"));
/// ```
#[macro_export]
macro_rules! adif {
    () => {
        ::core::result::Result::<$crate::Record, $crate::Error>::Ok($crate::Record::new())
    };

    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Record::from_fields([
            $(($name, $crate::Value::from($value))),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use crate::{Error, Record, TypeCode, Value};

    #[test]
    fn test_adif_macro_empty() {
        assert_eq!(adif!().unwrap(), Record::new());
    }

    #[test]
    fn test_adif_macro_fields() {
        let record = adif! {
            "call" => "W1AW",
            "band" => String::from("20m"),
            "qso_date" => Value::typed("20230101", TypeCode::DATE)
        }
        .unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record.get_str("band"), Some("20m"));
        assert_eq!(
            record.get("qso_date").and_then(Value::type_code),
            Some(TypeCode::DATE)
        );
    }

    #[test]
    fn test_adif_macro_invalid_name() {
        let result = adif! { "bad:name" => "x" };
        assert_eq!(result, Err(Error::InvalidFieldName("bad:name".to_string())));
    }
}
