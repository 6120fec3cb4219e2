//! Derived budget metrics.
//!
//! Metrics are never stored. They are recomputed from a [`Budget`] on every
//! call, so they cannot drift from the snapshot they describe.

use pocketbook_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryKey};
use super::types::Budget;

/// Chart colors, assigned by breakdown position.
pub const PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

/// Decimal places kept on `percent_of_expenses`.
pub const PERCENT_DP: u32 = 4;

/// One non-zero category in the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Category identity.
    pub key: CategoryKey,
    /// Display label.
    pub label: String,
    /// Planned amount.
    pub amount: Money,
    /// Share of total expenses as a fraction, rounded to [`PERCENT_DP`] places.
    pub percent_of_expenses: Decimal,
    /// Palette color for this position.
    pub color_hint: String,
}

/// Metrics derived from one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMetrics {
    /// Sum of all standard and custom categories.
    pub total_expenses: Money,
    /// Housing, food, and transport.
    pub fixed_expenses: Money,
    /// Everything that is not fixed.
    pub variable_expenses: Money,
    /// `income - total_expenses - savings_goal`. Negative means overspending.
    pub surplus_or_deficit: Money,
    /// Non-zero categories, largest first.
    pub category_breakdown: Vec<BreakdownEntry>,
}

impl BudgetMetrics {
    /// True when the budget spends more than it can afford after savings.
    #[must_use]
    pub fn is_deficit(&self) -> bool {
        self.surplus_or_deficit.is_negative()
    }
}

/// Computes [`BudgetMetrics`].
pub struct BudgetCalculator;

impl BudgetCalculator {
    /// Computes metrics for one budget.
    ///
    /// Deterministic: the breakdown is ordered by amount descending, then by
    /// category key, with a stable sort so duplicate custom names keep their
    /// input order.
    #[must_use]
    pub fn compute_metrics(budget: &Budget) -> BudgetMetrics {
        let categories = budget.categories();
        let total_expenses = categories.total();
        let fixed_expenses = categories.fixed_total();
        let surplus_or_deficit = budget.income() - total_expenses - budget.savings_goal();

        let mut entries: Vec<Category> = categories
            .entries()
            .filter(|c| !c.amount.is_zero())
            .collect();
        entries.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.key.cmp(&b.key)));

        let category_breakdown = entries
            .into_iter()
            .enumerate()
            .map(|(position, category)| BreakdownEntry {
                percent_of_expenses: category
                    .amount
                    .ratio_of(total_expenses)
                    .round_dp(PERCENT_DP),
                color_hint: Self::color_for(position).to_string(),
                key: category.key,
                label: category.label,
                amount: category.amount,
            })
            .collect();

        BudgetMetrics {
            total_expenses,
            fixed_expenses,
            variable_expenses: total_expenses - fixed_expenses,
            surplus_or_deficit,
            category_breakdown,
        }
    }

    /// Palette color for a breakdown position.
    #[must_use]
    pub const fn color_for(position: usize) -> &'static str {
        PALETTE[position % PALETTE.len()]
    }
}
