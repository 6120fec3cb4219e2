//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Validation limits and insight thresholds.
    #[serde(default)]
    pub engine: EngineConfig,
    /// History listing configuration.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Largest accepted amount for any money field.
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
    /// Maximum number of custom categories on one budget.
    #[serde(default = "default_max_custom_categories")]
    pub max_custom_categories: usize,
    /// Maximum custom category name length, in characters.
    #[serde(default = "default_max_category_name_len")]
    pub max_category_name_len: usize,
    /// Relative growth in total expenses that counts as rising (0.10 = 10%).
    #[serde(default = "default_rising_expenses_threshold")]
    pub rising_expenses_threshold: Decimal,
    /// Share of total expenses above which one category is flagged.
    #[serde(default = "default_concentration_threshold")]
    pub concentration_threshold: Decimal,
}

fn default_max_amount() -> Decimal {
    Decimal::from(10_000_000_000_i64)
}

fn default_max_custom_categories() -> usize {
    20
}

fn default_max_category_name_len() -> usize {
    50
}

fn default_rising_expenses_threshold() -> Decimal {
    Decimal::new(10, 2)
}

fn default_concentration_threshold() -> Decimal {
    Decimal::new(5, 1)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_amount: default_max_amount(),
            max_custom_categories: default_max_custom_categories(),
            max_category_name_len: default_max_category_name_len(),
            rising_expenses_threshold: default_rising_expenses_threshold(),
            concentration_threshold: default_concentration_threshold(),
        }
    }
}

/// History listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Page size used when the caller does not ask for one.
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    /// Upper bound for requested page sizes.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
}

fn default_per_page() -> u32 {
    10
}

fn default_max_per_page() -> u32 {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "pocketbook=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("POCKETBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
