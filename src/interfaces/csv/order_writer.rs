use crate::domain::summary::CustomerTotals;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TickRow<'a> {
    tick: u64,
    customer: &'a str,
    total: String,
}

/// Writes customer totals as CSV.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes `customer,total` rows, highest total first.
    ///
    /// The header is written even when there are no totals.
    pub fn write_totals(&mut self, totals: &CustomerTotals) -> Result<()> {
        if totals.is_empty() {
            self.writer.write_record(["customer", "total"])?;
        }
        for row in totals.ranked() {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes `tick,customer,total` rows for one stream step.
    pub fn write_tick(&mut self, tick: u64, totals: &CustomerTotals) -> Result<()> {
        for row in totals.ranked() {
            self.writer.serialize(TickRow {
                tick,
                customer: &row.customer,
                total: format!("{:.2}", row.total),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
