#![allow(dead_code)]

use batchstream::domain::order::{Amount, OrderRecord};
use chrono::NaiveTime;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

pub fn order(customer: &str, amount: Decimal) -> OrderRecord {
    OrderRecord::new(
        "O1000",
        customer,
        Amount::new(amount).expect("amount in range"),
        NaiveTime::from_hms_opt(12, 30, 0).expect("valid time"),
    )
}

/// Writes an orders CSV with the given `(order_id, customer, amount, time)` rows.
pub fn orders_csv(rows: &[(&str, &str, &str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "order_id,customer,amount,time").expect("Failed to write header");
    for (order_id, customer, amount, time) in rows {
        writeln!(file, "{},{},{},{}", order_id, customer, amount, time)
            .expect("Failed to write row");
    }
    file.flush().expect("Failed to flush");
    file
}
