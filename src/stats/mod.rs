//! Stats module - selection and aggregation

pub mod aggregator;

pub use aggregator::{AggregateError, Aggregator, RankedEntry};
