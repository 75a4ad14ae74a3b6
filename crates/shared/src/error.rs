//! Application-wide error types.

use thiserror::Error;

/// Message returned to callers for failures whose detail must not leak.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Message returned for unmatched routes.
pub const NOT_FOUND_MESSAGE: &str = "Endpoint no encontrado";

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input was rejected before any query ran.
    #[error("{0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// The data source failed (connection, malformed query, timeout).
    #[error("{0}")]
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
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code attached to failure logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message placed in the `error` field of the response.
    ///
    /// Driver messages are passed through verbatim; internal details are not.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Database(msg) => msg.clone(),
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
