use crate::domain::order::OrderRecord;
use crate::domain::ports::OrderStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory, append-only store for the orders of one session.
///
/// Uses `Arc<RwLock<Vec<OrderRecord>>>` so the store satisfies the `Send + Sync`
/// port while the session's engine is shared with its ticker task.
/// Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<OrderRecord>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn append(&self, order: OrderRecord) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.push(order);
        Ok(())
    }

    async fn all_orders(&self) -> Result<Vec<OrderRecord>> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }

    async fn len(&self) -> Result<usize> {
        let orders = self.orders.read().await;
        Ok(orders.len())
    }
}
