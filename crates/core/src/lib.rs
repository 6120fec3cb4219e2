//! Core business logic for Pocketbook.
//!
//! This crate contains the budget computation and validation engine with ZERO
//! web or database dependencies. Every computation is a pure function of its
//! inputs; persistence is reached only through the [`budget::BudgetRepository`]
//! trait.
//!
//! # Modules
//!
//! - `budget` - Input validation, budget construction, and metrics
//! - `history` - Aggregation of an owner's budgets into dashboard summaries
//! - `insights` - Insight rules and the static tip catalogue
//! - `export` - Report rows for export collaborators

pub mod budget;
pub mod export;
pub mod history;
pub mod insights;
