//! Property-based tests for budget metrics.

use chrono::Utc;
use pocketbook_shared::types::{Money, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::{BudgetCalculator, PERCENT_DP};
use super::clock::FixedClock;
use super::types::{Budget, RawAmount, RawBudgetInput, RawCustomCategory};
use super::validation::BudgetValidator;

fn amount(cents: i64) -> Option<RawAmount> {
    Some(Money::from_minor(cents).to_string().as_str().into())
}

/// Strategy for a valid budget with a mix of zero and non-zero categories.
fn budget_strategy() -> impl Strategy<Value = Budget> {
    (
        1i64..100_000_000i64,
        proptest::collection::vec(prop_oneof![Just(0i64), 0i64..10_000_000i64], 6),
        0i64..10_000_000i64,
        proptest::collection::vec(0i64..10_000_000i64, 0..6),
    )
        .prop_map(|(income, standard, savings, custom)| {
            let raw = RawBudgetInput {
                income: amount(income),
                housing: amount(standard[0]),
                food: amount(standard[1]),
                transport: amount(standard[2]),
                dependents: amount(standard[3]),
                miscellaneous: amount(standard[4]),
                others: amount(standard[5]),
                savings_goal: amount(savings),
                custom_categories: custom
                    .into_iter()
                    .enumerate()
                    .map(|(i, cents)| RawCustomCategory {
                        name: Some(format!("custom {i}")),
                        amount: amount(cents),
                    })
                    .collect(),
            };
            let input = BudgetValidator::default().validate(&raw).unwrap();
            Budget::create(Some(UserId::new()), input, &FixedClock(Utc::now())).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Breakdown amounts always add up to total expenses.
    #[test]
    fn prop_breakdown_sums_to_total(budget in budget_strategy()) {
        let metrics = BudgetCalculator::compute_metrics(&budget);
        let sum: Money = metrics.category_breakdown.iter().map(|e| e.amount).sum();
        prop_assert_eq!(sum, metrics.total_expenses);
        prop_assert_eq!(
            metrics.fixed_expenses + metrics.variable_expenses,
            metrics.total_expenses
        );
    }

    /// Percentages add up to one within rounding tolerance.
    #[test]
    fn prop_percentages_sum_to_one(budget in budget_strategy()) {
        let metrics = BudgetCalculator::compute_metrics(&budget);
        let sum: Decimal = metrics.category_breakdown.iter().map(|e| e.percent_of_expenses).sum();
        if metrics.total_expenses.is_zero() {
            prop_assert!(metrics.category_breakdown.is_empty());
        } else {
            let entries = Decimal::from(metrics.category_breakdown.len());
            let tolerance = Decimal::new(1, PERCENT_DP) * entries;
            prop_assert!((sum - Decimal::ONE).abs() <= tolerance, "sum was {}", sum);
        }
    }

    /// Surplus follows income minus expenses minus savings.
    #[test]
    fn prop_surplus_definition(budget in budget_strategy()) {
        let metrics = BudgetCalculator::compute_metrics(&budget);
        prop_assert_eq!(
            metrics.surplus_or_deficit,
            budget.income() - metrics.total_expenses - budget.savings_goal()
        );
    }

    /// Breakdown is sorted by amount descending with only non-zero entries.
    #[test]
    fn prop_breakdown_sorted_and_non_zero(budget in budget_strategy()) {
        let metrics = BudgetCalculator::compute_metrics(&budget);
        prop_assert!(metrics.category_breakdown.iter().all(|e| e.amount.is_positive()));
        for pair in metrics.category_breakdown.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
            if pair[0].amount == pair[1].amount {
                prop_assert!(pair[0].key <= pair[1].key);
            }
        }
    }

    /// Recomputing yields identical metrics.
    #[test]
    fn prop_compute_metrics_idempotent(budget in budget_strategy()) {
        prop_assert_eq!(
            BudgetCalculator::compute_metrics(&budget),
            BudgetCalculator::compute_metrics(&budget)
        );
    }
}
