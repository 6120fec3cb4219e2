//! Property-based tests for budget input validation and construction.

use chrono::Utc;
use pocketbook_shared::types::{Money, UserId};
use proptest::prelude::*;

use super::category::StandardCategory;
use super::clock::FixedClock;
use super::error::ValidationCode;
use super::types::{Budget, RawAmount, RawBudgetInput, RawCustomCategory};
use super::validation::BudgetValidator;

/// Strategy for a valid positive amount in cents (0.01 to 1,000,000.00).
fn positive_cents() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy for a valid non-negative amount in cents.
fn non_negative_cents() -> impl Strategy<Value = i64> {
    0i64..100_000_000i64
}

fn text(cents: i64) -> Option<RawAmount> {
    Some(Money::from_minor(cents).to_string().as_str().into())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any valid input builds a budget whose fields equal the validated input.
    #[test]
    fn prop_valid_input_round_trips_into_budget(
        income in positive_cents(),
        standard in proptest::collection::vec(non_negative_cents(), 6),
        savings in non_negative_cents(),
        custom in proptest::collection::vec(("[A-Za-z]{1,12}", non_negative_cents()), 0..5),
    ) {
        let mut raw = RawBudgetInput {
            income: text(income),
            savings_goal: text(savings),
            custom_categories: custom
                .iter()
                .map(|(name, cents)| RawCustomCategory { name: Some(name.clone()), amount: text(*cents) })
                .collect(),
            ..RawBudgetInput::default()
        };
        raw.housing = text(standard[0]);
        raw.food = text(standard[1]);
        raw.transport = text(standard[2]);
        raw.dependents = text(standard[3]);
        raw.miscellaneous = text(standard[4]);
        raw.others = text(standard[5]);

        let input = BudgetValidator::default().validate(&raw);
        prop_assert!(input.is_ok(), "valid input rejected: {:?}", input);
        let input = input.unwrap();

        prop_assert_eq!(input.income(), Money::from_minor(income));
        for (category, cents) in StandardCategory::ALL.into_iter().zip(&standard) {
            prop_assert_eq!(input.categories().standard.get(category), Money::from_minor(*cents));
        }

        let budget = Budget::create(Some(UserId::new()), input.clone(), &FixedClock(Utc::now()));
        prop_assert!(budget.is_ok());
        let budget = budget.unwrap();
        prop_assert_eq!(budget.income(), input.income());
        prop_assert_eq!(budget.savings_goal(), input.savings_goal());
        prop_assert_eq!(&budget.categories(), input.categories());
        prop_assert!(BudgetValidator::default().check_budget(&budget).is_ok());
    }

    /// Non-positive income is always rejected on the income field.
    #[test]
    fn prop_non_positive_income_rejected(cents in 0i64..100_000_000i64) {
        let raw = RawBudgetInput { income: text(-cents), ..RawBudgetInput::default() };
        let errors = BudgetValidator::default().validate(&raw).unwrap_err();
        prop_assert_eq!(errors.field("income"), &[ValidationCode::MustBePositive]);
    }

    /// Negative expenses are rejected on their own field and nowhere else.
    #[test]
    fn prop_negative_expense_rejected(
        cents in positive_cents(),
        index in 0usize..6,
    ) {
        let category = StandardCategory::ALL[index];
        let mut raw = RawBudgetInput { income: text(100_000), ..RawBudgetInput::default() };
        let amount = text(-cents);
        match category {
            StandardCategory::Housing => raw.housing = amount,
            StandardCategory::Food => raw.food = amount,
            StandardCategory::Transport => raw.transport = amount,
            StandardCategory::Dependents => raw.dependents = amount,
            StandardCategory::Miscellaneous => raw.miscellaneous = amount,
            StandardCategory::Others => raw.others = amount,
        }

        let errors = BudgetValidator::default().validate(&raw).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.field(category.as_str()), &[ValidationCode::MustNotBeNegative]);
    }

    /// Sub-cent precision is reported instead of silently rounded.
    #[test]
    fn prop_sub_cent_precision_rejected(cents in positive_cents(), extra in 1u32..10) {
        let value = format!("{}{extra}", Money::from_minor(cents));
        let raw = RawBudgetInput { income: Some(value.as_str().into()), ..RawBudgetInput::default() };
        let errors = BudgetValidator::default().validate(&raw).unwrap_err();
        prop_assert_eq!(errors.field("income"), &[ValidationCode::TooPrecise]);
    }
}
