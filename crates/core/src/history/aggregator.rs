//! Budget history aggregation.

use std::cmp::Reverse;

use super::types::{DashboardSummary, HistoryEntry};
use crate::budget::{Budget, BudgetCalculator, BudgetError, BudgetValidator};
use crate::insights::{AdvisoryKind, InsightEngine};

/// Combines one owner's budgets into a dashboard summary.
#[derive(Debug, Clone, Default)]
pub struct HistoryAggregator {
    engine: InsightEngine,
    validator: BudgetValidator,
}

impl HistoryAggregator {
    /// Creates an aggregator using `engine` for insights and `validator`'s
    /// limits for checking stored budgets.
    #[must_use]
    pub const fn new(engine: InsightEngine, validator: BudgetValidator) -> Self {
        Self { engine, validator }
    }

    /// Orders budgets newest first: `created_at` descending, then id descending.
    ///
    /// Ids are time-ordered, so equal timestamps resolve to the later-created budget.
    pub fn sort_newest_first(budgets: &mut [Budget]) {
        budgets.sort_by_key(|b| Reverse((b.created_at(), b.id())));
    }

    /// Aggregates `budgets`, given in any order.
    ///
    /// Metrics are recomputed for every entry on every call.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Precondition` if the budgets belong to more than one
    /// owner, or if any budget breaks the validation limits (non-positive income,
    /// negative or oversized amounts, totals that overflow).
    pub fn aggregate(&self, budgets: &[Budget]) -> Result<DashboardSummary, BudgetError> {
        let Some(first) = budgets.first() else {
            return Ok(DashboardSummary::default());
        };
        if let Some(other) = budgets.iter().find(|b| b.owner_id() != first.owner_id()) {
            return Err(BudgetError::Precondition(format!(
                "cannot aggregate budgets of owners {} and {}",
                first.owner_id(),
                other.owner_id()
            )));
        }
        for budget in budgets {
            self.validator.check_budget(budget)?;
        }

        let mut sorted = budgets.to_vec();
        Self::sort_newest_first(&mut sorted);
        let history: Vec<HistoryEntry> = sorted
            .into_iter()
            .map(|budget| {
                let metrics = BudgetCalculator::compute_metrics(&budget);
                HistoryEntry { budget, metrics }
            })
            .collect();

        let latest = history.first();
        let (insights, tips): (Vec<_>, Vec<_>) = self
            .engine
            .generate(
                latest.map(|e| &e.budget),
                latest.map(|e| &e.metrics),
                &history,
            )?
            .partition(|a| a.kind == AdvisoryKind::Insight);
        let latest_budget = latest.map(|e| e.budget.clone());
        let latest_metrics = latest.map(|e| e.metrics.clone());

        Ok(DashboardSummary {
            latest_budget,
            latest_metrics,
            history,
            insights,
            tips,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::clock::FixedClock;
    use crate::budget::{BudgetValidator, RawBudgetInput};
    use crate::insights::codes;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pocketbook_shared::types::{Money, UserId};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn budget(owner: UserId, when: DateTime<Utc>, income: &str, housing: &str) -> Budget {
        let raw = RawBudgetInput {
            income: Some(income.into()),
            housing: Some(housing.into()),
            ..RawBudgetInput::default()
        };
        let input = BudgetValidator::default().validate(&raw).unwrap();
        Budget::create(Some(owner), input, &FixedClock(when)).unwrap()
    }

    #[test]
    fn test_empty_input_is_no_data_state() {
        let summary = HistoryAggregator::default().aggregate(&[]).unwrap();
        assert!(summary.is_empty());
        assert!(summary.latest_metrics.is_none());
        assert!(summary.history.is_empty());
        assert!(summary.insights.is_empty());
        assert!(summary.tips.is_empty());
    }

    #[test]
    fn test_latest_and_rising_expenses() {
        let owner = UserId::new();
        let first = budget(owner, at(0), "1000", "300");
        let second = budget(owner, at(60), "1200", "900");

        let summary = HistoryAggregator::default()
            .aggregate(&[second.clone(), first.clone()])
            .unwrap();

        assert_eq!(summary.latest_budget.as_ref().map(Budget::id), Some(second.id()));
        assert_eq!(
            summary.latest_metrics.as_ref().map(|m| m.total_expenses),
            Some(Money::from_minor(90_000))
        );
        let ids: Vec<_> = summary.history.iter().map(|e| e.budget.id()).collect();
        assert_eq!(ids, [second.id(), first.id()]);
        assert!(summary.insights.iter().any(|a| a.code == codes::RISING_EXPENSES));
        assert!(!summary.tips.is_empty());
    }

    #[test]
    fn test_equal_timestamps_break_on_id() {
        let owner = UserId::new();
        let older = budget(owner, at(0), "1000", "100");
        let newer = budget(owner, at(0), "1000", "200");
        assert!(newer.id() > older.id());

        let summary = HistoryAggregator::default()
            .aggregate(&[older, newer.clone()])
            .unwrap();
        assert_eq!(summary.latest_budget.map(|b| b.id()), Some(newer.id()));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let owner = UserId::new();
        let a = budget(owner, at(0), "1000", "300");
        let b = budget(owner, at(5), "1000", "400");
        let c = budget(owner, at(10), "1000", "500");

        let aggregator = HistoryAggregator::default();
        let forward = aggregator.aggregate(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let shuffled = aggregator.aggregate(&[b, c, a]).unwrap();
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_mixed_owners_rejected() {
        let a = budget(UserId::new(), at(0), "1000", "300");
        let b = budget(UserId::new(), at(5), "1000", "300");
        let result = HistoryAggregator::default().aggregate(&[a, b]);
        assert!(matches!(result, Err(BudgetError::Precondition(_))));
    }

    /// Rewrites fields of a valid budget's stored form, as a corrupt store would.
    fn tampered(base: &Budget, edit: impl FnOnce(&mut serde_json::Value)) -> Budget {
        let mut stored = serde_json::to_value(base).unwrap();
        edit(&mut stored);
        serde_json::from_value(stored).unwrap()
    }

    #[rstest::rstest]
    #[case::negative_income(|v: &mut serde_json::Value| v["income"] = "-5.00".into())]
    #[case::zero_income(|v: &mut serde_json::Value| v["income"] = "0".into())]
    #[case::negative_expense(|v: &mut serde_json::Value| {
        v["standard_expenses"]["housing"] = "-300".into();
    })]
    #[case::negative_savings(|v: &mut serde_json::Value| v["savings_goal"] = "-1".into())]
    #[case::above_maximum(|v: &mut serde_json::Value| {
        v["standard_expenses"]["food"] = "10000000000.01".into();
    })]
    #[case::blank_custom_name(|v: &mut serde_json::Value| {
        v["custom_categories"] = serde_json::json!([{"name": "  ", "amount": "5"}]);
    })]
    fn test_stored_budget_breaking_limits_is_precondition(
        #[case] edit: fn(&mut serde_json::Value),
    ) {
        let owner = UserId::new();
        let good = budget(owner, at(0), "1000", "300");
        let bad = tampered(&budget(owner, at(5), "1000", "300"), edit);

        let result = HistoryAggregator::default().aggregate(&[good, bad]);
        assert!(matches!(result, Err(BudgetError::Precondition(_))), "{result:?}");
    }

    #[test]
    fn test_overflowing_amounts_are_precondition() {
        let huge = "79228162514264337593543950335";
        let bad = tampered(&budget(UserId::new(), at(0), "1000", "300"), |v| {
            v["standard_expenses"]["housing"] = huge.into();
            v["standard_expenses"]["food"] = huge.into();
        });

        let result = HistoryAggregator::default().aggregate(&[bad]);
        assert!(matches!(result, Err(BudgetError::Precondition(_))), "{result:?}");
    }

    #[test]
    fn test_sub_cent_amounts_cannot_be_loaded() {
        let mut stored =
            serde_json::to_value(budget(UserId::new(), at(0), "1000", "300")).unwrap();
        stored["income"] = "-5.001".into();
        assert!(serde_json::from_value::<Budget>(stored).is_err());
    }
}
