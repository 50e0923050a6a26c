use batchstream::application::engine::AggregationEngine;
use batchstream::application::pipeline::ingest_one;
use batchstream::application::ticker::StreamTicker;
use batchstream::domain::events::OrderEvent;
use batchstream::domain::generator::{IdStrategy, OrderGenerator};
use batchstream::domain::summary::CustomerTotals;
use batchstream::error::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::test]
async fn test_ticker_drives_stream_updates() {
    let engine = Arc::new(AggregationEngine::in_memory());
    let mut events = engine.subscribe();
    let generator = Arc::new(Mutex::new(
        OrderGenerator::seeded(17).with_id_strategy(IdStrategy::Sequential),
    ));
    let snapshots: Arc<Mutex<Vec<CustomerTotals>>> = Arc::new(Mutex::new(Vec::new()));

    let handle = {
        let engine = Arc::clone(&engine);
        let snapshots = Arc::clone(&snapshots);
        StreamTicker::new(Duration::from_millis(5))
            .max_ticks(5)
            .spawn(move |_| {
                let engine = Arc::clone(&engine);
                let generator = Arc::clone(&generator);
                let snapshots = Arc::clone(&snapshots);
                async move {
                    let mut generator = generator.lock().await;
                    let update = ingest_one(&engine, &mut *generator).await?;
                    snapshots.lock().await.push(update.totals);
                    Ok::<(), AppError>(())
                }
            })
    };

    assert_eq!(handle.join().await.unwrap(), 5);
    assert_eq!(engine.len().await.unwrap(), 5);

    // One appended event per tick, in order
    let mut ids = Vec::new();
    while let Ok(OrderEvent::Appended(order)) = events.try_recv() {
        ids.push(order.order_id);
    }
    assert_eq!(ids, vec!["O1", "O2", "O3", "O4", "O5"]);

    // Each refresh covers exactly the orders seen so far
    let snapshots = snapshots.lock().await;
    let orders = engine.orders().await.unwrap();
    for (i, totals) in snapshots.iter().enumerate() {
        let expected: Decimal = orders[..=i].iter().map(|o| o.amount.value()).sum();
        let actual: Decimal = totals.iter().map(|(_, total)| total).sum();
        assert_eq!(actual, expected);
    }
}

#[tokio::test]
async fn test_stopping_a_stream_keeps_appended_orders() {
    let engine = Arc::new(AggregationEngine::in_memory());
    let generator = Arc::new(Mutex::new(OrderGenerator::seeded(3)));

    let handle = {
        let engine = Arc::clone(&engine);
        StreamTicker::new(Duration::from_millis(5)).spawn(move |_| {
            let engine = Arc::clone(&engine);
            let generator = Arc::clone(&generator);
            async move {
                let mut generator = generator.lock().await;
                ingest_one(&engine, &mut *generator).await.map(|_| ())
            }
        })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.stop();
    let ticks = handle.join().await.unwrap();

    assert_eq!(engine.len().await.unwrap() as u64, ticks);
    let after_stop = engine.len().await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(engine.len().await.unwrap(), after_stop);
}
