use crate::domain::order::OrderRecord;
use crate::domain::summary::CustomerTotals;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io::{self, Write};

/// Width of the longest bar in a chart.
pub const BAR_WIDTH: usize = 40;

pub fn render_orders<W: Write>(out: &mut W, orders: &[OrderRecord]) -> io::Result<()> {
    writeln!(out, "{:<8} {:<10} {:>8}  {}", "ORDER", "CUSTOMER", "AMOUNT", "TIME")?;
    for order in orders {
        writeln!(
            out,
            "{:<8} {:<10} {:>8}  {}",
            order.order_id,
            order.customer,
            order.amount.to_string(),
            order.time
        )?;
    }
    if orders.is_empty() {
        writeln!(out, "(no orders)")?;
    }
    Ok(())
}

/// Horizontal bar chart of `totals`, highest first.
pub fn render_chart<W: Write>(out: &mut W, title: &str, totals: &CustomerTotals) -> io::Result<()> {
    writeln!(out, "{}", title)?;

    let rows = totals.ranked();
    let Some(max) = rows.first().map(|row| row.total) else {
        return writeln!(out, "(no data)");
    };

    for row in &rows {
        writeln!(
            out,
            "{:<10} {:<width$} {:.2}",
            row.customer,
            "#".repeat(bar_len(row.total, max)),
            row.total,
            width = BAR_WIDTH
        )?;
    }
    Ok(())
}

pub fn render_toast<W: Write>(out: &mut W, order: &OrderRecord) -> io::Result<()> {
    writeln!(out, "Streamed: {} spent ₹{}", order.customer, order.amount)
}

fn bar_len(total: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO {
        return 0;
    }
    (total * Decimal::from(BAR_WIDTH) / max)
        .round()
        .to_usize()
        .unwrap_or(0)
        .clamp(1, BAR_WIDTH)
}
