//! Report rows for export collaborators.
//!
//! Reports are cut from an aggregated [`DashboardSummary`]; there is no
//! separate export-specific computation path.

use chrono::{DateTime, Utc};
use pocketbook_shared::types::BudgetId;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetError;
use crate::history::{DashboardSummary, HistoryEntry};

/// Most rows a history export carries.
pub const HISTORY_EXPORT_LIMIT: usize = 100;

/// How many of the most recent budgets a single-budget export searches.
pub const SINGLE_EXPORT_WINDOW: usize = 20;

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "budget_id", rename_all = "snake_case")]
pub enum ExportScope {
    /// One budget.
    Single(BudgetId),
    /// The owner's history, newest first.
    History,
}

/// Export payload handed to a report generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// When the report was cut.
    pub generated_at: DateTime<Utc>,
    /// Scope the report was built for.
    pub scope: ExportScope,
    /// Budgets with their metrics, newest first.
    pub rows: Vec<HistoryEntry>,
}

/// Builds export reports.
pub struct ExportService;

impl ExportService {
    /// Cuts a report for `scope` out of an aggregated summary.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if a single-budget scope names a budget
    /// that is not among the most recent [`SINGLE_EXPORT_WINDOW`] entries.
    pub fn build_report(
        summary: &DashboardSummary,
        scope: ExportScope,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportReport, BudgetError> {
        let rows = match scope {
            ExportScope::History => summary
                .history
                .iter()
                .take(HISTORY_EXPORT_LIMIT)
                .cloned()
                .collect(),
            ExportScope::Single(id) => {
                let entry = summary
                    .history
                    .iter()
                    .take(SINGLE_EXPORT_WINDOW)
                    .find(|e| e.budget.id() == id)
                    .ok_or(BudgetError::NotFound(id))?;
                vec![entry.clone()]
            }
        };

        Ok(ExportReport {
            generated_at,
            scope,
            rows,
        })
    }
}
