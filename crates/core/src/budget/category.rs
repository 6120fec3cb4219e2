//! Standard and custom expense categories attached to one budget.

use std::cmp::Ordering;
use std::fmt;

use pocketbook_shared::types::Money;
use serde::{Deserialize, Serialize};

/// One of the six fixed expense buckets every budget carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardCategory {
    /// Rent or mortgage.
    Housing,
    /// Groceries and eating out.
    Food,
    /// Commuting and travel.
    Transport,
    /// Support paid for dependents.
    Dependents,
    /// Small recurring costs.
    Miscellaneous,
    /// Anything else.
    Others,
}

impl StandardCategory {
    /// All standard categories in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Housing,
        Self::Food,
        Self::Transport,
        Self::Dependents,
        Self::Miscellaneous,
        Self::Others,
    ];

    /// Stable key used in field names, sort keys, and serialized output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Dependents => "dependents",
            Self::Miscellaneous => "miscellaneous",
            Self::Others => "others",
        }
    }

    /// Parses a standard category key.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Whether the category counts toward fixed (rather than variable) expenses.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::Housing | Self::Food | Self::Transport)
    }
}

impl fmt::Display for StandardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a category within one budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CategoryKey {
    /// A standard bucket.
    Standard(StandardCategory),
    /// A user-defined category, keyed by its (trimmed) name.
    Custom(String),
}

impl CategoryKey {
    /// Lexical sort key. Custom keys are prefixed so they never equal a
    /// standard key even when a user names a category "food".
    #[must_use]
    pub fn sort_key(&self) -> String {
        match self {
            Self::Standard(category) => category.as_str().to_string(),
            Self::Custom(name) => format!("custom:{name}"),
        }
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sort_key())
    }
}

/// A category with its amount, as seen by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identity.
    pub key: CategoryKey,
    /// Label for display. Standard labels are the key; translation is external.
    pub label: String,
    /// Planned amount.
    pub amount: Money,
}

/// A user-defined expense entry.
///
/// Duplicate names are allowed and stay distinct list entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Planned amount, never negative.
    pub amount: Money,
}

/// Amounts for the six standard categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardExpenses {
    /// Housing amount.
    pub housing: Money,
    /// Food amount.
    pub food: Money,
    /// Transport amount.
    pub transport: Money,
    /// Dependents amount.
    pub dependents: Money,
    /// Miscellaneous amount.
    pub miscellaneous: Money,
    /// Others amount.
    pub others: Money,
}

impl StandardExpenses {
    /// Returns the amount for one category.
    #[must_use]
    pub const fn get(&self, category: StandardCategory) -> Money {
        match category {
            StandardCategory::Housing => self.housing,
            StandardCategory::Food => self.food,
            StandardCategory::Transport => self.transport,
            StandardCategory::Dependents => self.dependents,
            StandardCategory::Miscellaneous => self.miscellaneous,
            StandardCategory::Others => self.others,
        }
    }

    /// Returns a mutable slot for one category.
    pub fn slot_mut(&mut self, category: StandardCategory) -> &mut Money {
        match category {
            StandardCategory::Housing => &mut self.housing,
            StandardCategory::Food => &mut self.food,
            StandardCategory::Transport => &mut self.transport,
            StandardCategory::Dependents => &mut self.dependents,
            StandardCategory::Miscellaneous => &mut self.miscellaneous,
            StandardCategory::Others => &mut self.others,
        }
    }

    /// Iterates `(category, amount)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StandardCategory, Money)> + '_ {
        StandardCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of all six amounts.
    #[must_use]
    pub fn total(&self) -> Money {
        self.iter().map(|(_, amount)| amount).sum()
    }
}

/// The full category set of one budget: fixed standard buckets plus an open custom list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    /// Standard category amounts.
    pub standard: StandardExpenses,
    /// Custom categories in user order.
    pub custom: Vec<CustomCategory>,
}

impl CategorySet {
    /// Iterates every category, standard first, then custom in user order.
    pub fn entries(&self) -> impl Iterator<Item = Category> + '_ {
        let standard = self.standard.iter().map(|(category, amount)| Category {
            key: CategoryKey::Standard(category),
            label: category.as_str().to_string(),
            amount,
        });
        let custom = self.custom.iter().map(|c| Category {
            key: CategoryKey::Custom(c.name.clone()),
            label: c.name.clone(),
            amount: c.amount,
        });
        standard.chain(custom)
    }

    /// Sum of standard and custom amounts.
    #[must_use]
    pub fn total(&self) -> Money {
        self.standard.total() + self.custom.iter().map(|c| c.amount).sum::<Money>()
    }

    /// Sum of standard and custom amounts, `None` on overflow.
    #[must_use]
    pub fn checked_total(&self) -> Option<Money> {
        self.entries()
            .try_fold(Money::ZERO, |total, c| total.checked_add(c.amount))
    }

    /// Sum of housing, food, and transport.
    #[must_use]
    pub fn fixed_total(&self) -> Money {
        self.standard
            .iter()
            .filter(|(category, _)| category.is_fixed())
            .map(|(_, amount)| amount)
            .sum()
    }
}
