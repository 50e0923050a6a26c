use super::order::OrderRecord;

/// Notifications published by the engine as its state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    /// One record was appended to the session.
    Appended(OrderRecord),
}
