//! Command implementations.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use pocketbook_core::budget::{
    Budget, BudgetCalculator, BudgetError, BudgetMetrics, BudgetService, BudgetValidator,
    InMemoryBudgetRepository, RawBudgetInput, SystemClock, ValidationLimits,
};
use pocketbook_core::export::ExportScope;
use pocketbook_core::history::{DashboardSummary, HistoryEntry};
use pocketbook_core::insights::{Advisory, AdvisoryKind, InsightConfig, InsightEngine};
use pocketbook_shared::AppConfig;
use pocketbook_shared::types::{BudgetId, PageResponse, UserId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// Exit code for input that failed validation or named a missing budget.
const EXIT_REJECTED: u8 = 2;

#[derive(Serialize)]
struct CheckReport {
    metrics: BudgetMetrics,
    insights: Vec<Advisory>,
    tips: Vec<Advisory>,
}

#[derive(Serialize)]
struct DashboardReport {
    summary: DashboardSummary,
    page: PageResponse<HistoryEntry>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to encode output")?;
    writeln!(out).context("Failed to write output")?;
    Ok(())
}

fn service_for(
    path: &Path,
    config: &AppConfig,
) -> anyhow::Result<BudgetService<InMemoryBudgetRepository, SystemClock>> {
    let budgets: Vec<Budget> = read_json(path)?;
    info!(count = budgets.len(), path = %path.display(), "Loaded budgets");
    let repo = Arc::new(InMemoryBudgetRepository::with_budgets(budgets));
    Ok(BudgetService::with_config(repo, SystemClock, config))
}

/// Maps engine rejections to a non-zero exit with the error printed as JSON.
fn rejected(out: &mut impl Write, err: BudgetError) -> anyhow::Result<ExitCode> {
    match err {
        BudgetError::Validation(errors) => {
            warn!(fields = errors.len(), "Budget input rejected");
            print_json(out, &serde_json::json!({ "errors": errors }))?;
            Ok(ExitCode::from(EXIT_REJECTED))
        }
        BudgetError::NotFound(id) => {
            warn!(budget_id = %id, "Budget not found");
            print_json(out, &serde_json::json!({ "error": "not_found", "budget_id": id }))?;
            Ok(ExitCode::from(EXIT_REJECTED))
        }
        other => Err(other.into()),
    }
}

/// Validates one raw budget and prints its metrics and advisories.
pub fn check(input: &Path, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let raw: RawBudgetInput = read_json(input)?;
    let validator = BudgetValidator::new(ValidationLimits::from(&config.engine));
    let validated = match validator.validate(&raw) {
        Ok(validated) => validated,
        Err(errors) => return rejected(out, BudgetError::Validation(errors)),
    };

    let budget = Budget::create(Some(UserId::new()), validated, &SystemClock)?;
    let metrics = BudgetCalculator::compute_metrics(&budget);
    let history = [HistoryEntry {
        budget,
        metrics: metrics.clone(),
    }];
    let engine = InsightEngine::new(InsightConfig::from(&config.engine));
    let (insights, tips): (Vec<_>, Vec<_>) = engine
        .generate(Some(&history[0].budget), Some(&history[0].metrics), &history)?
        .partition(|a| a.kind == AdvisoryKind::Insight);

    print_json(
        out,
        &CheckReport {
            metrics,
            insights,
            tips,
        },
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the dashboard summary and one page of its history.
pub async fn dashboard(
    input: &Path,
    owner: UserId,
    page: u32,
    per_page: Option<u32>,
    config: &AppConfig,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let service = service_for(input, config)?;
    let summary = service.dashboard(owner).await?;
    let page = service
        .page_request(page, per_page)
        .paginate(&summary.history);
    print_json(out, &DashboardReport { summary, page })?;
    Ok(ExitCode::SUCCESS)
}

/// Prints export rows for one budget or the whole history.
pub async fn export(
    input: &Path,
    owner: UserId,
    budget: Option<BudgetId>,
    config: &AppConfig,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let service = service_for(input, config)?;
    let scope = budget.map_or(ExportScope::History, ExportScope::Single);
    match service.export(owner, scope).await {
        Ok(report) => {
            print_json(out, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => rejected(out, err),
    }
}
