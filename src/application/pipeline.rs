use super::engine::AggregationEngine;
use crate::domain::generator::OrderGenerator;
use crate::domain::order::OrderRecord;
use crate::domain::summary::CustomerTotals;
use crate::error::Result;
use rand::Rng;
use std::time::Duration;
use tracing::info;

/// What one stream step produced: the new order and the refreshed totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamUpdate {
    pub order: OrderRecord,
    pub totals: CustomerTotals,
}

/// Generates one order, appends it, and recomputes the totals.
pub async fn ingest_one<R: Rng>(
    engine: &AggregationEngine,
    generator: &mut OrderGenerator<R>,
) -> Result<StreamUpdate> {
    let order = generator.generate();
    engine.append(order.clone()).await?;
    let totals = engine.aggregate().await?;
    Ok(StreamUpdate { order, totals })
}

/// Appends `count` generated orders, waits out the simulated job `latency`,
/// then aggregates the whole sequence once.
pub async fn run_batch<R: Rng>(
    engine: &AggregationEngine,
    generator: &mut OrderGenerator<R>,
    count: usize,
    latency: Duration,
) -> Result<CustomerTotals> {
    for _ in 0..count {
        engine.append(generator.generate()).await?;
    }

    info!(
        orders = engine.len().await?,
        latency_ms = latency.as_millis() as u64,
        "Running batch job"
    );
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let totals = engine.aggregate().await?;
    info!(customers = totals.len(), "Batch job complete");
    Ok(totals)
}
