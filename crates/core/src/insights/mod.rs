//! Advisory generation: data-derived insights and static tips.

pub mod engine;
pub mod tips;
pub mod types;

pub use engine::{codes, InsightConfig, InsightEngine};
pub use types::{Advisory, AdvisoryKind, ParamValue, Severity};
