//! Budget error types.

use std::collections::BTreeMap;
use std::fmt;

use pocketbook_shared::AppError;
use pocketbook_shared::types::BudgetId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    /// A required field is missing.
    Required,
    /// Value could not be read as a number.
    NotANumber,
    /// Value has more than two decimal places.
    TooPrecise,
    /// Value must be strictly greater than zero.
    MustBePositive,
    /// Value must be zero or greater.
    MustNotBeNegative,
    /// Value is above the configured maximum amount.
    ExceedsMaximum,
    /// Text is empty after trimming.
    Blank,
    /// Text is longer than allowed.
    TooLong,
    /// List has more entries than allowed.
    TooMany,
}

impl ValidationCode {
    /// Returns the string form of the code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::NotANumber => "not_a_number",
            Self::TooPrecise => "too_precise",
            Self::MustBePositive => "must_be_positive",
            Self::MustNotBeNegative => "must_not_be_negative",
            Self::ExceedsMaximum => "exceeds_maximum",
            Self::Blank => "blank",
            Self::TooLong => "too_long",
            Self::TooMany => "too_many",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All field errors found in one validation pass, keyed by field name.
///
/// Codes for one field keep the order in which rules reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<ValidationCode>>);

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one code against a field.
    pub fn add(&mut self, field: impl Into<String>, code: ValidationCode) {
        self.0.entry(field.into()).or_default().push(code);
    }

    /// True when no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes recorded for one field.
    #[must_use]
    pub fn field(&self, name: &str) -> &[ValidationCode] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidationCode])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, codes) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: ")?;
            for (i, code) in codes.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{code}")?;
            }
        }
        Ok(())
    }
}

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Raw input failed validation.
    #[error("Invalid budget input: {0}")]
    Validation(ValidationErrors),

    /// Budget not found (or not owned by the caller).
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Budget construction was attempted without an owner.
    #[error("Budget owner is required")]
    MissingOwner,

    /// A caller broke an engine contract.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// The budget store failed.
    #[error("Budget storage failed: {0}")]
    Storage(String),
}

impl From<ValidationErrors> for BudgetError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::Validation(errors) => Self::Validation(errors.to_string()),
            BudgetError::NotFound(id) => Self::NotFound(format!("budget {id}")),
            BudgetError::MissingOwner => Self::Precondition("budget owner is required".into()),
            BudgetError::Precondition(msg) => Self::Precondition(msg),
            BudgetError::Storage(msg) => Self::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_keep_per_field_order() {
        let mut errors = ValidationErrors::new();
        errors.add("income", ValidationCode::TooPrecise);
        errors.add("income", ValidationCode::MustBePositive);
        errors.add("food", ValidationCode::NotANumber);

        assert_eq!(
            errors.field("income"),
            &[ValidationCode::TooPrecise, ValidationCode::MustBePositive]
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.field("housing").is_empty());
        assert_eq!(
            errors.to_string(),
            "food: not_a_number; income: too_precise,must_be_positive"
        );
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("income", ValidationCode::Required);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"income":["required"]}"#);
    }

    #[test]
    fn test_app_error_mapping() {
        let id = BudgetId::new();
        let app: AppError = BudgetError::NotFound(id).into();
        assert_eq!(app.error_code(), "NOT_FOUND");

        let app: AppError = BudgetError::Precondition("mixed owners".into()).into();
        assert_eq!(app.error_code(), "PRECONDITION_VIOLATION");

        let app: AppError = BudgetError::Validation(ValidationErrors::new()).into();
        assert_eq!(app.status_code(), 400);
    }
}
