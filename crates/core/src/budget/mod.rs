//! Budget validation, construction, and metrics.

pub mod calculator;
pub mod category;
pub mod clock;
pub mod error;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod validation_props;

pub use calculator::{BreakdownEntry, BudgetCalculator, BudgetMetrics, PALETTE};
pub use category::{
    Category, CategoryKey, CategorySet, CustomCategory, StandardCategory, StandardExpenses,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BudgetError, ValidationCode, ValidationErrors};
pub use repository::{BudgetRepository, InMemoryBudgetRepository};
pub use service::BudgetService;
pub use types::{Budget, RawAmount, RawBudgetInput, RawCustomCategory, ValidatedBudgetInput};
pub use validation::{BudgetValidator, ValidationLimits};
