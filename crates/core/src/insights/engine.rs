//! Rule-driven insight generation.
//!
//! Rules live in a static table and are evaluated lazily, grouped by severity
//! (warning, positive, info) and in table order within a severity. The static
//! tip catalogue follows the insights. Nothing is cached between calls, so the
//! same inputs always yield the same sequence.

use pocketbook_shared::EngineConfig;
use rust_decimal::Decimal;

use super::tips;
use super::types::{Advisory, Severity};
use crate::budget::{Budget, BudgetError, BudgetMetrics};
use crate::history::HistoryEntry;

/// Insight codes.
pub mod codes {
    /// Expenses plus savings exceed income.
    pub const OVERSPENDING: &str = "overspending";
    /// One category dominates total expenses.
    pub const CATEGORY_CONCENTRATION: &str = "category_concentration";
    /// Total expenses grew past the threshold since the prior budget.
    pub const RISING_EXPENSES: &str = "rising_expenses";
    /// The surplus covers the savings goal.
    pub const GOAL_ACHIEVABLE: &str = "goal_achievable";
    /// Money is left over after expenses and savings.
    pub const SURPLUS: &str = "surplus";
}

/// Thresholds used by the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    /// Relative growth in total expenses that counts as rising (0.10 = 10%).
    pub rising_expenses_threshold: Decimal,
    /// Share of total expenses above which one category is flagged.
    pub concentration_threshold: Decimal,
}

impl From<&EngineConfig> for InsightConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            rising_expenses_threshold: config.rising_expenses_threshold,
            concentration_threshold: config.concentration_threshold,
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
struct RuleContext<'a> {
    budget: &'a Budget,
    metrics: &'a BudgetMetrics,
    history: &'a [HistoryEntry],
    config: &'a InsightConfig,
}

struct Rule {
    severity: Severity,
    eval: fn(&RuleContext<'_>) -> Option<Advisory>,
}

const RULES: &[Rule] = &[
    Rule {
        severity: Severity::Warning,
        eval: overspending,
    },
    Rule {
        severity: Severity::Warning,
        eval: category_concentration,
    },
    Rule {
        severity: Severity::Warning,
        eval: rising_expenses,
    },
    Rule {
        severity: Severity::Positive,
        eval: goal_achievable,
    },
    Rule {
        severity: Severity::Info,
        eval: surplus,
    },
];

fn overspending(ctx: &RuleContext<'_>) -> Option<Advisory> {
    let value = ctx.metrics.surplus_or_deficit;
    value.is_negative().then(|| {
        Advisory::insight(codes::OVERSPENDING, Severity::Warning).with_param("deficit", value.abs())
    })
}

fn category_concentration(ctx: &RuleContext<'_>) -> Option<Advisory> {
    let total = ctx.metrics.total_expenses;
    let limit = total.scaled_by(ctx.config.concentration_threshold);
    // The breakdown is sorted, so only the largest entry can be the first to cross.
    let top = ctx.metrics.category_breakdown.first()?;
    (top.amount.amount() > limit).then(|| {
        Advisory::insight(codes::CATEGORY_CONCENTRATION, Severity::Warning)
            .with_param("category", top.label.clone())
            .with_param("percent", top.percent_of_expenses)
    })
}

fn rising_expenses(ctx: &RuleContext<'_>) -> Option<Advisory> {
    if ctx.history.len() < 2 {
        return None;
    }
    let latest_id = ctx.budget.id();
    let prior = ctx.history.iter().find(|e| e.budget.id() != latest_id)?;
    let previous = prior.metrics.total_expenses;
    let current = ctx.metrics.total_expenses;

    let limit = previous.scaled_by(Decimal::ONE + ctx.config.rising_expenses_threshold);
    if current.amount() <= limit {
        return None;
    }

    let mut advisory = Advisory::insight(codes::RISING_EXPENSES, Severity::Warning)
        .with_param("previous", previous)
        .with_param("current", current);
    if previous.is_positive() {
        let change = (current - previous).ratio_of(previous).round_dp(4);
        advisory = advisory.with_param("change_percent", change);
    }
    Some(advisory)
}

fn goal_achievable(ctx: &RuleContext<'_>) -> Option<Advisory> {
    let value = ctx.metrics.surplus_or_deficit;
    let goal = ctx.budget.savings_goal();
    (!value.is_negative() && goal.is_positive() && value >= goal).then(|| {
        Advisory::insight(codes::GOAL_ACHIEVABLE, Severity::Positive)
            .with_param("savings_goal", goal)
            .with_param("surplus", value)
    })
}

fn surplus(ctx: &RuleContext<'_>) -> Option<Advisory> {
    let value = ctx.metrics.surplus_or_deficit;
    value
        .is_positive()
        .then(|| Advisory::insight(codes::SURPLUS, Severity::Info).with_param("surplus", value))
}

impl<'a> RuleContext<'a> {
    fn insights(self) -> impl Iterator<Item = Advisory> + Clone + 'a {
        Severity::ORDER.into_iter().flat_map(move |severity| {
            RULES
                .iter()
                .filter(move |rule| rule.severity == severity)
                .filter_map(move |rule| (rule.eval)(&self))
        })
    }
}

/// Generates insights and tips for a budget.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    /// Creates an engine with explicit thresholds.
    #[must_use]
    pub const fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Thresholds in force.
    #[must_use]
    pub const fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Lazily yields insights for `budget` followed by the static tips.
    ///
    /// `history` is the owner's full history sorted newest first and may
    /// include `budget` itself. With no budget and no history the sequence
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Precondition` if `budget` is absent while
    /// `history` is not empty, or if `metrics` is missing for a budget.
    pub fn generate<'a>(
        &'a self,
        budget: Option<&'a Budget>,
        metrics: Option<&'a BudgetMetrics>,
        history: &'a [HistoryEntry],
    ) -> Result<impl Iterator<Item = Advisory> + Clone + 'a, BudgetError> {
        let context = match (budget, metrics) {
            (Some(budget), Some(metrics)) => Some(RuleContext {
                budget,
                metrics,
                history,
                config: &self.config,
            }),
            (None, _) if history.is_empty() => None,
            (None, _) => {
                return Err(BudgetError::Precondition(
                    "insights requested without a latest budget for a non-empty history".into(),
                ));
            }
            (Some(budget), None) => {
                return Err(BudgetError::Precondition(format!(
                    "metrics missing for budget {}",
                    budget.id()
                )));
            }
        };

        Ok(context
            .into_iter()
            .flat_map(|ctx| ctx.insights().chain(tips::catalogue())))
    }
}
