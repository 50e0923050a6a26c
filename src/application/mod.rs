//! Application layer orchestrating the domain.
//!
//! This module defines the `AggregationEngine`, which owns one session's order
//! sequence, the pipeline steps shared by the batch and stream triggers, and
//! the `StreamTicker` that drives the stream trigger on a fixed interval.

pub mod engine;
pub mod pipeline;
pub mod ticker;
