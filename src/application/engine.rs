use crate::domain::events::OrderEvent;
use crate::domain::order::OrderRecord;
use crate::domain::ports::OrderStoreBox;
use crate::domain::summary::{self, CustomerTotals};
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryOrderStore;
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CAPACITY: usize = 64;

/// Owns the order sequence of one session and answers aggregate queries.
///
/// Both the batch trigger and the stream trigger drive the same engine; the
/// only difference between them is how often [`AggregationEngine::aggregate`]
/// is called.
pub struct AggregationEngine {
    store: OrderStoreBox,
    events: broadcast::Sender<OrderEvent>,
}

impl AggregationEngine {
    /// Creates a new `AggregationEngine` over the given store.
    ///
    /// # Arguments
    ///
    /// * `store` - The store holding the session's orders.
    pub fn new(store: OrderStoreBox) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    /// Creates an engine backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryOrderStore::new()))
    }

    /// Appends one order to the end of the sequence.
    ///
    /// Malformed orders are rejected before they reach the store, so a failed
    /// append never changes the aggregate.
    pub async fn append(&self, order: OrderRecord) -> Result<()> {
        order.validate()?;
        self.store.append(order.clone()).await?;
        debug!(
            order_id = %order.order_id,
            customer = %order.customer,
            amount = %order.amount,
            "Order appended"
        );

        // No subscribers is fine
        let _ = self.events.send(OrderEvent::Appended(order));
        Ok(())
    }

    /// Sums amounts per customer over every order appended so far.
    pub async fn aggregate(&self) -> Result<CustomerTotals> {
        let orders = self.store.all_orders().await?;
        Ok(summary::aggregate(&orders))
    }

    /// Snapshot of the sequence in append order.
    pub async fn orders(&self) -> Result<Vec<OrderRecord>> {
        self.store.all_orders().await
    }

    pub async fn len(&self) -> Result<usize> {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Receives one [`OrderEvent::Appended`] per successful append made after
    /// this call.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.events.subscribe()
    }
}
