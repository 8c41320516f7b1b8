use adif_record::{
    parse, parse_str, to_bytes, to_bytes_with_options, AdifOptions, Error, FieldOrder, Record,
    Separator, TypeCode, Value,
};

#[test]
fn test_sample_record() {
    let record = parse(b"<CALL:4>W1AW<QSO_DATE:8:D>20230101").unwrap();
    assert_eq!(record.get_str("call"), Some("W1AW"));
    assert_eq!(record.get_str("qso_date"), Some("20230101"));

    let bytes = to_bytes(&record);
    println!("Serialized: {}", String::from_utf8_lossy(&bytes));

    let back = parse(&bytes).unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back.get_str("call"), Some("W1AW"));
    assert_eq!(back.get_str("qso_date"), Some("20230101"));
}

#[test]
fn test_empty_buffer_is_empty_record() {
    let record = parse(b"").unwrap();
    assert!(record.is_empty());
    assert_eq!(record, Record::new());
}

#[test]
fn test_trailing_whitespace_between_fields() {
    let record = parse(b"<A:1>x   <B:1>y").unwrap();
    let expected = Record::from_fields([("a", "x"), ("b", "y")]).unwrap();
    assert_eq!(record, expected);
}

#[test]
fn test_truncated_value() {
    let err = parse(b"<call:10>W1AW").unwrap_err();
    assert!(matches!(
        err,
        Error::TruncatedValue {
            declared: 10,
            available: 4,
            ..
        }
    ));
}

#[test]
fn test_invalid_length() {
    let err = parse(b"<call:abc>W1AW").unwrap_err();
    match err {
        Error::InvalidLength { field, found, .. } => {
            assert_eq!(field, "call");
            assert_eq!(found, "abc");
        }
        other => panic!("Expected InvalidLength, got {:?}", other),
    }
}

#[test]
fn test_zero_length_field() {
    let record = parse(b"<comment:0><call:4>W1AW").unwrap();
    assert_eq!(record.get_str("comment"), Some(""));
    assert_eq!(record.get_str("call"), Some("W1AW"));
}

#[test]
fn test_adversarial_value() {
    let record = parse(b"<comment:15><call:4>FAKE>:<<band:3>20m").unwrap();
    assert_eq!(record.get_str("comment"), Some("<call:4>FAKE>:<"));
    assert_eq!(record.get_str("band"), Some("20m"));
    assert!(!record.contains("call"));
}

#[test]
fn test_realistic_qso() {
    let input = "<CALL:5>K1ABC <QSO_DATE:8:D>20230415 <TIME_ON:6:T>142300\n\
                 <BAND:3>20m <MODE:3>FT8 <FREQ:9:N>14.074123\n\
                 <RST_SENT:3>-10 <RST_RCVD:3>-07 <GRIDSQUARE:4>FN42\n\
                 <COMMENT:19>Nice signal <73> :)\n";
    let record = parse_str(input).unwrap();

    assert_eq!(record.len(), 10);
    assert_eq!(record.get_str("mode"), Some("FT8"));
    assert_eq!(record.get_str("comment"), Some("Nice signal <73> :)"));
    assert_eq!(
        record.get("freq").and_then(Value::type_code),
        Some(TypeCode::NUMBER)
    );

    let pretty = to_bytes_with_options(&record, &AdifOptions::pretty());
    println!("Pretty:\n{}", String::from_utf8_lossy(&pretty));
    assert_eq!(parse(&pretty).unwrap(), record);
}

#[test]
fn test_duplicate_fields_last_wins() {
    let record = parse(b"<call:4>W1AW<call:5>K1ABC").unwrap();
    assert_eq!(record.len(), 1);
    assert_eq!(record.get_str("call"), Some("K1ABC"));
}

#[test]
fn test_sorted_output_is_stable() {
    let a = parse(b"<call:4>W1AW<band:3>20m<mode:2>CW").unwrap();
    let b = parse(b"<mode:2>CW<call:4>W1AW<band:3>20m").unwrap();
    let options = AdifOptions::new().with_order(FieldOrder::Sorted);
    assert_eq!(
        to_bytes_with_options(&a, &options),
        to_bytes_with_options(&b, &options)
    );
    assert_ne!(to_bytes(&a), to_bytes(&b));
}

#[test]
fn test_separators_parse_back() {
    let record = parse(b"<call:4>W1AW<band:3>20m").unwrap();
    for separator in [
        Separator::None,
        Separator::Space,
        Separator::Newline,
        Separator::CrLf,
    ] {
        let options = AdifOptions::new().with_separator(separator);
        let bytes = to_bytes_with_options(&record, &options);
        assert_eq!(parse(&bytes).unwrap(), record, "separator {:?}", separator);
    }
}

#[test]
fn test_binary_value() {
    let mut record = Record::new();
    record.set("blob", vec![0u8, 0xff, b'<', b'>', b'\n']).unwrap();
    let back = parse(&record.serialize()).unwrap();
    assert_eq!(
        back.get("blob").map(Value::as_bytes),
        Some(&[0u8, 0xff, b'<', b'>', b'\n'][..])
    );
    assert_eq!(back.get_str("blob"), None);
}

#[test]
fn test_fingerprint_detects_duplicates() {
    let logged = parse(b"<CALL:5>K1ABC<QSO_DATE:8:D>20230415<BAND:3>20m").unwrap();
    let imported = parse(b"<band:3>20m\n<qso_date:8>20230415\n<call:5>K1ABC").unwrap();
    let other = parse(b"<CALL:5>K1ABC<QSO_DATE:8:D>20230415<BAND:3>40m").unwrap();

    assert_eq!(logged.fingerprint(), imported.fingerprint());
    assert_ne!(logged.fingerprint(), other.fingerprint());
    assert!(logged
        .fingerprint()
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_error_messages() {
    let err = parse(b"<call:4>W1AW <eor>").unwrap_err();
    println!("Error: {}", err);
    assert!(err.to_string().contains("Malformed tag at byte 13"));

    let err = parse(b"<call:10>W1AW").unwrap_err();
    assert!(err.to_string().contains("declared 10 bytes, 4 available"));
}
