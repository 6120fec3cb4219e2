//! Dashboard types.

use serde::{Deserialize, Serialize};

use crate::budget::{Budget, BudgetMetrics};
use crate::insights::Advisory;

/// One budget paired with its freshly computed metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The budget snapshot.
    pub budget: Budget,
    /// Metrics derived from `budget`.
    pub metrics: BudgetMetrics,
}

/// Everything a dashboard shows for one owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Most recent budget. `None` means the owner has no data yet.
    pub latest_budget: Option<Budget>,
    /// Metrics of the most recent budget.
    pub latest_metrics: Option<BudgetMetrics>,
    /// All budgets, newest first.
    pub history: Vec<HistoryEntry>,
    /// Data-derived insights.
    pub insights: Vec<Advisory>,
    /// Static tips.
    pub tips: Vec<Advisory>,
}

impl DashboardSummary {
    /// True for the "no data yet" state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.latest_budget.is_none()
    }
}
