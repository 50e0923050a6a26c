use super::csv::order_writer::OrderWriter;
use super::text;
use crate::application::pipeline::StreamUpdate;
use crate::domain::order::OrderRecord;
use crate::domain::summary::CustomerTotals;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// How results are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tables and bar charts for a terminal
    #[default]
    Text,
    /// `customer,total` rows (`tick,customer,total` when streaming)
    Csv,
    /// One JSON document per report (one line per tick when streaming)
    Json,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    orders: &'a [OrderRecord],
    totals: &'a CustomerTotals,
}

#[derive(Serialize)]
struct TickReport<'a> {
    tick: u64,
    order: &'a OrderRecord,
    totals: &'a CustomerTotals,
}

enum Sink<W: Write> {
    Plain(W),
    Csv(OrderWriter<W>),
}

/// Renders engine output in the chosen [`OutputFormat`].
pub struct Presenter<W: Write> {
    format: OutputFormat,
    sink: Sink<W>,
}

impl<W: Write> Presenter<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        let sink = match format {
            OutputFormat::Csv => Sink::Csv(OrderWriter::new(out)),
            OutputFormat::Text | OutputFormat::Json => Sink::Plain(out),
        };
        Self { format, sink }
    }

    /// Notice shown while the batch job runs. Text output only.
    pub fn batch_started(&mut self) -> Result<()> {
        if let Sink::Plain(out) = &mut self.sink
            && self.format == OutputFormat::Text
        {
            writeln!(out, "Running batch job...")?;
            out.flush()?;
        }
        Ok(())
    }

    pub fn batch_finished(&mut self) -> Result<()> {
        if let Sink::Plain(out) = &mut self.sink
            && self.format == OutputFormat::Text
        {
            writeln!(out, "Batch job complete!")?;
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn batch_report(&mut self, orders: &[OrderRecord], totals: &CustomerTotals) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.write_totals(totals)?,
            Sink::Plain(out) if self.format == OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &BatchReport { orders, totals })?;
                writeln!(out)?;
            }
            Sink::Plain(out) => {
                writeln!(out, "### Current Orders")?;
                text::render_orders(out, orders)?;
                writeln!(out)?;
                text::render_chart(out, "### Batch Summary", totals)?;
            }
        }
        Ok(())
    }

    /// Announces the start of a stream; `ticks` is `None` when unbounded.
    pub fn stream_started(&mut self, ticks: Option<u64>) -> Result<()> {
        if let Sink::Plain(out) = &mut self.sink
            && self.format == OutputFormat::Text
        {
            match ticks {
                Some(n) => writeln!(out, "Simulating live stream... ({} events)", n)?,
                None => writeln!(out, "Simulating live stream... (Ctrl-C to stop)")?,
            }
        }
        Ok(())
    }

    /// Toast-style notice for one appended order. Text output only.
    pub fn order_appended(&mut self, order: &OrderRecord) -> Result<()> {
        if let Sink::Plain(out) = &mut self.sink
            && self.format == OutputFormat::Text
        {
            text::render_toast(out, order)?;
        }
        Ok(())
    }

    pub fn stream_update(&mut self, tick: u64, update: &StreamUpdate) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.write_tick(tick, &update.totals)?,
            Sink::Plain(out) if self.format == OutputFormat::Json => {
                let report = TickReport {
                    tick,
                    order: &update.order,
                    totals: &update.totals,
                };
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            }
            Sink::Plain(out) => {
                let title = format!("--- Live Sales by Customer (tick {}) ---", tick);
                text::render_chart(out, &title, &update.totals)?;
                writeln!(out)?;
            }
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Sink::Plain(out) = &mut self.sink {
            out.flush()?;
        }
        Ok(())
    }
}
