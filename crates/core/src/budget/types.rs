//! Budget data types.
//!
//! `RawBudgetInput` is the only loosely-typed value in the engine. It is turned
//! into a `ValidatedBudgetInput` by the validator, and only a validated input can
//! become a `Budget`.

use chrono::{DateTime, Utc};
use pocketbook_shared::types::{BudgetId, Money, UserId};
use serde::{Deserialize, Serialize};

use super::category::{CategorySet, CustomCategory, StandardCategory, StandardExpenses};
use super::clock::Clock;
use super::error::BudgetError;

/// An untrusted amount as it arrives from a form or JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A JSON number, kept as its source text (`arbitrary_precision`) and
    /// never read as a float.
    Number(serde_json::Number),
    /// Free text such as `"1,200.50"`.
    Text(String),
    /// Any other JSON value (bool, array, object). Always rejected as
    /// `not_a_number` by the validator.
    Other(serde_json::Value),
}

impl RawAmount {
    /// Text form handed to the money parser. `None` for values that are
    /// neither numbers nor text.
    #[must_use]
    pub fn as_text(&self) -> Option<std::borrow::Cow<'_, str>> {
        match self {
            Self::Number(n) => Some(std::borrow::Cow::Owned(n.to_string())),
            Self::Text(s) => Some(std::borrow::Cow::Borrowed(s.as_str())),
            Self::Other(_) => None,
        }
    }

    /// True for text that is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// An untrusted custom category entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCustomCategory {
    /// Category name.
    #[serde(default)]
    pub name: Option<String>,
    /// Category amount.
    #[serde(default)]
    pub amount: Option<RawAmount>,
}

/// Untrusted budget fields, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBudgetInput {
    /// Monthly income. Required.
    #[serde(default)]
    pub income: Option<RawAmount>,
    /// Housing expense. Defaults to zero.
    #[serde(default)]
    pub housing: Option<RawAmount>,
    /// Food expense. Defaults to zero.
    #[serde(default)]
    pub food: Option<RawAmount>,
    /// Transport expense. Defaults to zero.
    #[serde(default)]
    pub transport: Option<RawAmount>,
    /// Dependents expense. Defaults to zero.
    #[serde(default)]
    pub dependents: Option<RawAmount>,
    /// Miscellaneous expense. Defaults to zero.
    #[serde(default)]
    pub miscellaneous: Option<RawAmount>,
    /// Other expenses. Defaults to zero.
    #[serde(default)]
    pub others: Option<RawAmount>,
    /// Savings goal. Defaults to zero.
    #[serde(default)]
    pub savings_goal: Option<RawAmount>,
    /// User-defined categories.
    #[serde(default)]
    pub custom_categories: Vec<RawCustomCategory>,
}

impl RawBudgetInput {
    /// Raw value for one standard category field.
    #[must_use]
    pub fn standard(&self, category: StandardCategory) -> Option<&RawAmount> {
        match category {
            StandardCategory::Housing => self.housing.as_ref(),
            StandardCategory::Food => self.food.as_ref(),
            StandardCategory::Transport => self.transport.as_ref(),
            StandardCategory::Dependents => self.dependents.as_ref(),
            StandardCategory::Miscellaneous => self.miscellaneous.as_ref(),
            StandardCategory::Others => self.others.as_ref(),
        }
    }
}

/// Budget fields that passed every validation rule.
///
/// Can only be produced by [`super::BudgetValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBudgetInput {
    pub(crate) income: Money,
    pub(crate) categories: CategorySet,
    pub(crate) savings_goal: Money,
}

impl ValidatedBudgetInput {
    /// Validated income, always positive.
    #[must_use]
    pub const fn income(&self) -> Money {
        self.income
    }

    /// Validated categories.
    #[must_use]
    pub const fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Validated savings goal.
    #[must_use]
    pub const fn savings_goal(&self) -> Money {
        self.savings_goal
    }
}

/// One immutable monthly budget snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    id: BudgetId,
    owner_id: UserId,
    income: Money,
    standard_expenses: StandardExpenses,
    custom_categories: Vec<CustomCategory>,
    savings_goal: Money,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supersedes: Option<BudgetId>,
}

impl Budget {
    /// Builds a budget from validated input, assigning a fresh id and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MissingOwner` if `owner_id` is `None`.
    pub fn create(
        owner_id: Option<UserId>,
        input: ValidatedBudgetInput,
        clock: &dyn Clock,
    ) -> Result<Self, BudgetError> {
        let owner_id = owner_id.ok_or(BudgetError::MissingOwner)?;
        Ok(Self::build(owner_id, input, clock, None))
    }

    /// Builds a new budget that replaces `previous`. The previous snapshot is left as is.
    #[must_use]
    pub fn revision_of(previous: &Self, input: ValidatedBudgetInput, clock: &dyn Clock) -> Self {
        Self::build(previous.owner_id, input, clock, Some(previous.id))
    }

    fn build(
        owner_id: UserId,
        input: ValidatedBudgetInput,
        clock: &dyn Clock,
        supersedes: Option<BudgetId>,
    ) -> Self {
        let ValidatedBudgetInput {
            income,
            categories,
            savings_goal,
        } = input;
        Self {
            id: BudgetId::new(),
            owner_id,
            income,
            standard_expenses: categories.standard,
            custom_categories: categories.custom,
            savings_goal,
            created_at: clock.now(),
            supersedes,
        }
    }

    /// Budget id.
    #[must_use]
    pub const fn id(&self) -> BudgetId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Monthly income.
    #[must_use]
    pub const fn income(&self) -> Money {
        self.income
    }

    /// Standard category amounts.
    #[must_use]
    pub const fn standard_expenses(&self) -> &StandardExpenses {
        &self.standard_expenses
    }

    /// Custom categories in user order.
    #[must_use]
    pub fn custom_categories(&self) -> &[CustomCategory] {
        &self.custom_categories
    }

    /// Savings goal, treated as a committed outflow.
    #[must_use]
    pub const fn savings_goal(&self) -> Money {
        self.savings_goal
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Budget this one replaced, if it was created as a revision.
    #[must_use]
    pub const fn supersedes(&self) -> Option<BudgetId> {
        self.supersedes
    }

    /// Owned view of the category set.
    #[must_use]
    pub fn categories(&self) -> CategorySet {
        CategorySet {
            standard: self.standard_expenses,
            custom: self.custom_categories.clone(),
        }
    }
}
