//! Parse an ADIF record, read fields, and write it back.
//!
//! Run with: cargo run --example simple

use adif_record::{parse, Record};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let input = b"<CALL:5>K1ABC <QSO_DATE:8:D>20230415 <BAND:3>20m <MODE:3>FT8";

    let record: Record = parse(input)?;
    println!("call: {}", record.get_str("CALL").unwrap_or("?"));
    println!("date: {}", record.get_str("qso_date").unwrap_or("?"));

    let bytes = record.serialize();
    println!("ADIF output:\n{}\n", String::from_utf8_lossy(&bytes));

    let record_back = parse(&bytes)?;
    assert_eq!(record, record_back);
    println!("✓ Round-trip successful");

    Ok(())
}
