//! Control field order, separators and type codes in ADIF output.
//!
//! Run with: cargo run --example custom_options

use adif_record::{adif, AdifOptions, FieldOrder, Separator, TypeCode, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let record = adif! {
        "call" => "W1AW",
        "time_on" => Value::typed("142300", TypeCode::TIME),
        "qso_date" => Value::typed("20230101", TypeCode::DATE),
        "comment" => "QRP <5W>",
    }?;

    let compact = record.serialize();
    println!("Compact:\n{}\n", String::from_utf8_lossy(&compact));

    let pretty = record.serialize_with(&AdifOptions::pretty());
    println!("Pretty:\n{}\n", String::from_utf8_lossy(&pretty));

    let untyped = record.serialize_with(
        &AdifOptions::new()
            .with_type_codes(false)
            .with_separator(Separator::Space)
            .with_order(FieldOrder::Sorted),
    );
    println!("Untyped, sorted:\n{}", String::from_utf8_lossy(&untyped));

    Ok(())
}
