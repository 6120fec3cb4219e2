//! Field validation for raw budget input.
//!
//! Every rule runs independently and all violations are collected, so a caller
//! can show every field error at once. Income is not compared against
//! expenses; a deficit budget is valid.

use pocketbook_shared::EngineConfig;
use pocketbook_shared::types::{Money, MoneyError};
use rust_decimal::Decimal;

use super::category::{CategorySet, CustomCategory, StandardCategory};
use super::error::{BudgetError, ValidationCode, ValidationErrors};
use super::types::{Budget, RawAmount, RawBudgetInput, RawCustomCategory, ValidatedBudgetInput};

/// Field name for the custom category list itself.
pub const CUSTOM_CATEGORIES_FIELD: &str = "custom_categories";

/// Limits applied by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Largest accepted amount for any money field.
    pub max_amount: Decimal,
    /// Maximum number of custom categories.
    pub max_custom_categories: usize,
    /// Maximum custom category name length, in characters.
    pub max_category_name_len: usize,
}

impl From<&EngineConfig> for ValidationLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_amount: config.max_amount,
            max_custom_categories: config.max_custom_categories,
            max_category_name_len: config.max_category_name_len,
        }
    }
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Sign constraint for one money field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Positive,
    NonNegative,
}

/// Validates raw budget input at the single typed boundary.
#[derive(Debug, Clone, Default)]
pub struct BudgetValidator {
    limits: ValidationLimits,
}

impl BudgetValidator {
    /// Creates a validator with explicit limits.
    #[must_use]
    pub const fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Limits in force.
    #[must_use]
    pub const fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validates every field of `raw`.
    ///
    /// # Errors
    ///
    /// Returns the full field → codes map if any rule fails.
    pub fn validate(&self, raw: &RawBudgetInput) -> Result<ValidatedBudgetInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let income = self.required_amount("income", raw.income.as_ref(), Bound::Positive, &mut errors);

        let mut categories = CategorySet::default();
        for category in StandardCategory::ALL {
            if let Some(amount) =
                self.optional_amount(category.as_str(), raw.standard(category), &mut errors)
            {
                *categories.standard.slot_mut(category) = amount;
            }
        }

        let savings_goal =
            self.optional_amount("savings_goal", raw.savings_goal.as_ref(), &mut errors);

        if raw.custom_categories.len() > self.limits.max_custom_categories {
            errors.add(CUSTOM_CATEGORIES_FIELD, ValidationCode::TooMany);
        }
        for (index, entry) in raw.custom_categories.iter().enumerate() {
            if let Some(custom) = self.custom_category(index, entry, &mut errors) {
                categories.custom.push(custom);
            }
        }

        match (income, savings_goal) {
            (Some(income), Some(savings_goal)) if errors.is_empty() => Ok(ValidatedBudgetInput {
                income,
                categories,
                savings_goal,
            }),
            _ => Err(errors),
        }
    }

    /// Re-checks a stored budget against the same limits `validate` enforces.
    ///
    /// Budgets loaded from a store bypass `validate`, so history aggregation
    /// runs this before doing any arithmetic on them.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Precondition` naming the first broken rule.
    pub fn check_budget(&self, budget: &Budget) -> Result<(), BudgetError> {
        let broken = |rule: String| -> Result<(), BudgetError> {
            Err(BudgetError::Precondition(format!(
                "budget {} {rule}",
                budget.id()
            )))
        };

        if !budget.income().is_positive() {
            return broken(format!("has non-positive income {}", budget.income()));
        }
        let categories = budget.categories();
        if categories.custom.len() > self.limits.max_custom_categories {
            return broken(format!(
                "has {} custom categories",
                categories.custom.len()
            ));
        }
        if let Some(custom) = categories.custom.iter().find(|c| {
            c.name.trim().is_empty() || c.name.chars().count() > self.limits.max_category_name_len
        }) {
            return broken(format!("has invalid category name {:?}", custom.name));
        }

        let amounts = std::iter::once(("income".to_string(), budget.income()))
            .chain(std::iter::once((
                "savings_goal".to_string(),
                budget.savings_goal(),
            )))
            .chain(categories.entries().map(|c| (c.label, c.amount)));
        for (field, amount) in amounts {
            if amount.is_negative() {
                return broken(format!("has negative {field} {amount}"));
            }
            if amount.amount() > self.limits.max_amount {
                return broken(format!("has {field} above the maximum"));
            }
            if amount.amount().scale() > Money::SCALE {
                return broken(format!("has {field} finer than one cent"));
            }
        }

        if categories
            .checked_total()
            .and_then(|total| total.checked_add(budget.savings_goal()))
            .is_none()
        {
            return broken("has amounts that overflow when summed".to_string());
        }
        Ok(())
    }

    fn custom_category(
        &self,
        index: usize,
        entry: &RawCustomCategory,
        errors: &mut ValidationErrors,
    ) -> Option<CustomCategory> {
        let name_field = format!("{CUSTOM_CATEGORIES_FIELD}[{index}].name");
        let amount_field = format!("{CUSTOM_CATEGORIES_FIELD}[{index}].amount");

        let name = match entry.name.as_deref().map(str::trim) {
            None => {
                errors.add(name_field, ValidationCode::Required);
                None
            }
            Some("") => {
                errors.add(name_field, ValidationCode::Blank);
                None
            }
            Some(name) if name.chars().count() > self.limits.max_category_name_len => {
                errors.add(name_field, ValidationCode::TooLong);
                None
            }
            Some(name) => Some(name.to_string()),
        };

        let amount = self.required_amount(
            &amount_field,
            entry.amount.as_ref(),
            Bound::NonNegative,
            errors,
        );

        Some(CustomCategory {
            name: name?,
            amount: amount?,
        })
    }

    fn optional_amount(
        &self,
        field: &str,
        raw: Option<&RawAmount>,
        errors: &mut ValidationErrors,
    ) -> Option<Money> {
        match raw {
            Some(value) if !value.is_blank() => {
                self.check_amount(field, value, Bound::NonNegative, errors)
            }
            _ => Some(Money::ZERO),
        }
    }

    fn required_amount(
        &self,
        field: &str,
        raw: Option<&RawAmount>,
        bound: Bound,
        errors: &mut ValidationErrors,
    ) -> Option<Money> {
        match raw {
            Some(value) if !value.is_blank() => self.check_amount(field, value, bound, errors),
            _ => {
                errors.add(field, ValidationCode::Required);
                None
            }
        }
    }

    fn check_amount(
        &self,
        field: &str,
        raw: &RawAmount,
        bound: Bound,
        errors: &mut ValidationErrors,
    ) -> Option<Money> {
        let Some(text) = raw.as_text() else {
            errors.add(field, ValidationCode::NotANumber);
            return None;
        };
        let (value, money) = match Money::parse(&text) {
            Ok(money) => (money.amount(), Some(money)),
            Err(MoneyError::TooPrecise(value)) => {
                errors.add(field, ValidationCode::TooPrecise);
                (value, None)
            }
            Err(MoneyError::Empty | MoneyError::NotANumber(_)) => {
                errors.add(field, ValidationCode::NotANumber);
                return None;
            }
        };

        let before = errors.field(field).len();
        match bound {
            Bound::Positive if value <= Decimal::ZERO => {
                errors.add(field, ValidationCode::MustBePositive);
            }
            Bound::NonNegative if value < Decimal::ZERO => {
                errors.add(field, ValidationCode::MustNotBeNegative);
            }
            _ => {}
        }
        if value > self.limits.max_amount {
            errors.add(field, ValidationCode::ExceedsMaximum);
        }

        if errors.field(field).len() == before {
            money
        } else {
            None
        }
    }
}
