//! Budget history aggregation and dashboard summaries.

pub mod aggregator;
pub mod types;

pub use aggregator::HistoryAggregator;
pub use types::{DashboardSummary, HistoryEntry};
