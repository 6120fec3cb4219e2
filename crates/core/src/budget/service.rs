//! Budget service: validation, persistence, and dashboard assembly.

use std::sync::Arc;

use pocketbook_shared::types::{BudgetId, PageRequest, PageResponse, UserId};
use pocketbook_shared::{AppConfig, HistoryConfig};
use tracing::{debug, info};

use super::clock::Clock;
use super::error::BudgetError;
use super::repository::BudgetRepository;
use super::types::{Budget, RawBudgetInput, ValidatedBudgetInput};
use super::validation::{BudgetValidator, ValidationLimits};
use crate::export::{ExportReport, ExportScope, ExportService};
use crate::history::{DashboardSummary, HistoryAggregator, HistoryEntry};
use crate::insights::{InsightConfig, InsightEngine};

/// Budget service for business logic around a repository.
pub struct BudgetService<R: BudgetRepository, C: Clock> {
    repo: Arc<R>,
    clock: C,
    validator: BudgetValidator,
    aggregator: HistoryAggregator,
    history: HistoryConfig,
}

impl<R: BudgetRepository, C: Clock> BudgetService<R, C> {
    /// Creates a service with default limits and thresholds.
    #[must_use]
    pub fn new(repo: Arc<R>, clock: C) -> Self {
        Self::with_config(repo, clock, &AppConfig::default())
    }

    /// Creates a service using limits and thresholds from `config`.
    #[must_use]
    pub fn with_config(repo: Arc<R>, clock: C, config: &AppConfig) -> Self {
        Self {
            repo,
            clock,
            validator: BudgetValidator::new(ValidationLimits::from(&config.engine)),
            aggregator: HistoryAggregator::new(
                InsightEngine::new(InsightConfig::from(&config.engine)),
                BudgetValidator::new(ValidationLimits::from(&config.engine)),
            ),
            history: config.history.clone(),
        }
    }

    /// Validator in use.
    #[must_use]
    pub const fn validator(&self) -> &BudgetValidator {
        &self.validator
    }

    /// Validates, builds, and stores a new budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Validation` with every field error, or a storage error.
    pub async fn create_budget(
        &self,
        owner_id: UserId,
        raw: &RawBudgetInput,
    ) -> Result<Budget, BudgetError> {
        let input = self.validate(owner_id, raw)?;
        let budget = Budget::create(Some(owner_id), input, &self.clock)?;
        self.repo.save(budget.clone()).await?;

        info!(
            owner_id = %owner_id,
            budget_id = %budget.id(),
            income = %budget.income(),
            "Budget created"
        );
        Ok(budget)
    }

    /// Stores a new budget that supersedes `previous_id`. The previous budget is kept.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if `previous_id` does not exist for this
    /// owner, or `BudgetError::Validation` if `raw` is invalid.
    pub async fn revise_budget(
        &self,
        owner_id: UserId,
        previous_id: BudgetId,
        raw: &RawBudgetInput,
    ) -> Result<Budget, BudgetError> {
        let previous = self
            .repo
            .find_by_id(owner_id, previous_id)
            .await?
            .ok_or(BudgetError::NotFound(previous_id))?;
        let input = self.validate(owner_id, raw)?;
        let budget = Budget::revision_of(&previous, input, &self.clock);
        self.repo.save(budget.clone()).await?;

        info!(
            owner_id = %owner_id,
            budget_id = %budget.id(),
            supersedes = %previous_id,
            "Budget revised"
        );
        Ok(budget)
    }

    /// Deletes a budget. Deletion is terminal.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the budget is absent or owned by someone else.
    pub async fn delete_budget(&self, owner_id: UserId, id: BudgetId) -> Result<(), BudgetError> {
        if !self.repo.delete(owner_id, id).await? {
            return Err(BudgetError::NotFound(id));
        }
        info!(owner_id = %owner_id, budget_id = %id, "Budget deleted");
        Ok(())
    }

    /// Builds the dashboard summary for one owner.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or `BudgetError::Precondition` if the store
    /// returned budgets of another owner.
    pub async fn dashboard(&self, owner_id: UserId) -> Result<DashboardSummary, BudgetError> {
        let budgets = self.repo.load_for_owner(owner_id).await?;
        debug!(owner_id = %owner_id, count = budgets.len(), "Aggregating budgets");

        let summary = self.aggregator.aggregate(&budgets)?;
        info!(
            owner_id = %owner_id,
            budgets = summary.history.len(),
            insights = summary.insights.len(),
            "Dashboard built"
        );
        Ok(summary)
    }

    /// Returns one page of the owner's history, newest first.
    ///
    /// `page` and `per_page` are clamped to the configured bounds; a missing
    /// `per_page` uses the configured default.
    ///
    /// # Errors
    ///
    /// Same as [`Self::dashboard`].
    pub async fn history_page(
        &self,
        owner_id: UserId,
        page: u32,
        per_page: Option<u32>,
    ) -> Result<PageResponse<HistoryEntry>, BudgetError> {
        let summary = self.dashboard(owner_id).await?;
        Ok(self.page_request(page, per_page).paginate(&summary.history))
    }

    /// History page request clamped to the configured sizes. A missing
    /// `per_page` uses the configured default.
    #[must_use]
    pub fn page_request(&self, page: u32, per_page: Option<u32>) -> PageRequest {
        PageRequest::clamped(
            page,
            per_page.unwrap_or(self.history.default_per_page),
            self.history.max_per_page,
        )
    }

    /// Builds an export report from the aggregated dashboard.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` for an unknown single-budget scope.
    pub async fn export(
        &self,
        owner_id: UserId,
        scope: ExportScope,
    ) -> Result<ExportReport, BudgetError> {
        let summary = self.dashboard(owner_id).await?;
        let report = ExportService::build_report(&summary, scope, self.clock.now())?;
        info!(owner_id = %owner_id, rows = report.rows.len(), "Export prepared");
        Ok(report)
    }

    fn validate(
        &self,
        owner_id: UserId,
        raw: &RawBudgetInput,
    ) -> Result<ValidatedBudgetInput, BudgetError> {
        self.validator.validate(raw).map_err(|errors| {
            debug!(owner_id = %owner_id, fields = errors.len(), %errors, "Budget input rejected");
            BudgetError::Validation(errors)
        })
    }
}
