use super::order::OrderRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only storage for the orders of one session.
///
/// Implementations must preserve insertion order.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn append(&self, order: OrderRecord) -> Result<()>;
    async fn all_orders(&self) -> Result<Vec<OrderRecord>>;
    async fn len(&self) -> Result<usize>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
