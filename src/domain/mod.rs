//! Domain types: orders, their generator, the aggregation rule, and the
//! storage port the engine depends on.

pub mod events;
pub mod generator;
pub mod order;
pub mod ports;
pub mod summary;
