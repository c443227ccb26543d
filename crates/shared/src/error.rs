//! Application-wide error types.

use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input: out-of-range field or bad pagination parameters.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the message may be shown to the caller verbatim.
    ///
    /// Server-side failures are reported with a generic message so that
    /// driver details never leak into responses.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Builds the JSON error body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            "An error occurred".to_string()
        };

        ErrorBody {
            error: self.error_code(),
            message,
        }
    }
}

/// Error payload rendered by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
