//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Collaborators at the transport edge map these onto their own responses;
/// the engine never produces display strings beyond these diagnostics.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed field validation. Carries a serialized field map.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller broke an engine contract. Never shown as a generic message.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// The external budget store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Precondition(_) | Self::Storage(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Precondition(_) => "PRECONDITION_VIOLATION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors the end user can act on.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
