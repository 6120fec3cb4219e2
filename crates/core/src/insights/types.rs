//! Advisory types.

use std::collections::BTreeMap;
use std::fmt;

use pocketbook_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an advisory is derived from data or is a static tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    /// Derived from the budget and its history.
    Insight,
    /// Static, not derived from data.
    Tip,
}

/// Advisory severity. Declaration order is presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Needs attention.
    Warning,
    /// Good news.
    Positive,
    /// Neutral information.
    Info,
}

impl Severity {
    /// All severities in presentation order.
    pub const ORDER: [Self; 3] = [Self::Warning, Self::Positive, Self::Info];

    /// Returns the string form of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Positive => "positive",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value in an advisory parameter bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A money amount.
    Money(Money),
    /// A fraction such as `0.25` for 25%.
    Ratio(Decimal),
    /// Free text such as a category label.
    Text(String),
}

impl From<Money> for ParamValue {
    fn from(value: Money) -> Self {
        Self::Money(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Ratio(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A structured advisory message. Rendering and translation happen elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Insight or tip.
    pub kind: AdvisoryKind,
    /// Stable machine code, e.g. `overspending`.
    pub code: String,
    /// Severity.
    pub severity: Severity,
    /// Translation key for the message text.
    pub message_template_id: String,
    /// Values substituted into the message template.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,
}

impl Advisory {
    /// Builds a data-derived insight with template id `budget_insight_<code>`.
    #[must_use]
    pub fn insight(code: &str, severity: Severity) -> Self {
        Self {
            kind: AdvisoryKind::Insight,
            code: code.to_string(),
            severity,
            message_template_id: format!("budget_insight_{code}"),
            params: BTreeMap::new(),
        }
    }

    /// Builds a static tip with template id `budget_tip_<code>`.
    #[must_use]
    pub fn tip(code: &str) -> Self {
        Self {
            kind: AdvisoryKind::Tip,
            code: code.to_string(),
            severity: Severity::Info,
            message_template_id: format!("budget_tip_{code}"),
            params: BTreeMap::new(),
        }
    }

    /// Adds one parameter.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Looks up one parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}
