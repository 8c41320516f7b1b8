//! Detect duplicate contacts with record fingerprints.
//!
//! Run with: cargo run --example dedup

use adif_record::{parse, Record};
use std::collections::HashSet;
use std::error::Error;

const KEY_FIELDS: [&str; 4] = ["call", "qso_date", "time_on", "band"];

fn main() -> Result<(), Box<dyn Error>> {
    let inputs: [&[u8]; 3] = [
        b"<CALL:5>K1ABC<QSO_DATE:8:D>20230415<TIME_ON:4>1423<BAND:3>20m<QSL_RCVD:1>N",
        b"<band:3>20m <time_on:4>1423 <qso_date:8>20230415 <call:5>K1ABC <qsl_rcvd:1>Y",
        b"<CALL:4>W1AW<QSO_DATE:8:D>20230415<TIME_ON:4>1500<BAND:3>40m",
    ];

    let mut seen = HashSet::new();
    for input in inputs {
        let record: Record = parse(input)?;
        let key = record.fingerprint_of(KEY_FIELDS);
        let call = record.get_str("call").unwrap_or("?");
        if seen.insert(key.clone()) {
            println!("new       {} {}", call, &key[..12]);
        } else {
            println!("duplicate {} {}", call, &key[..12]);
        }
    }

    Ok(())
}
