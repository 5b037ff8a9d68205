//! Error types for the fitlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request field was missing, malformed or out of range
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Category outside the fixed Warm-up / Workout / Cool-down set
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Dependent state (e.g. the user profile) is missing
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Numeric domain violation inside a calculator
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store state error (poisoned lock)
    #[error("State error: {0}")]
    State(String),
}

impl Error {
    /// Build a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Machine-readable status code reported at the request boundary
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation_error",
            Error::InvalidCategory(_) => "invalid_category",
            Error::PreconditionFailed(_) => "precondition_failed",
            Error::InvalidInput(_) => "invalid_input",
            _ => "internal_error",
        }
    }

    /// HTTP-equivalent status for this error
    pub fn http_status(&self) -> u16 {
        if self.is_user_error() {
            400
        } else {
            500
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::InvalidCategory(_)
                | Error::PreconditionFailed(_)
                | Error::InvalidInput(_)
        )
    }
}
