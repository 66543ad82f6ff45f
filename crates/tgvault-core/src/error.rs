//! Error types module
//!
//! This module provides the core error types used throughout the tgvault
//! application. All errors are unified under the `AppError` enum which can
//! represent database, configuration, and input errors.

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    /// No storage backend is configured at all. Fatal to every request,
    /// distinct from a per-request exhaustion.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata per variant: (http_status, error_code, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::Config(_) => (500, "CONFIGURATION_ERROR", true, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// HTTP status code to return for this error.
    pub fn http_status_code(&self) -> u16 {
        static_metadata(self).0
    }

    /// Machine-readable error code (e.g. "DATABASE_ERROR").
    pub fn error_code(&self) -> &'static str {
        static_metadata(self).1
    }

    /// Whether details should be hidden in production.
    pub fn is_sensitive(&self) -> bool {
        static_metadata(self).2
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        static_metadata(self).3
    }

    /// Client-facing message. Sensitive variants get a generic message;
    /// the detailed one is for logs only.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Config(_) => "The service is misconfigured".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Full message including the error chain, for logs and non-production
    /// response details.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Database(source) => format!("Database error: {}", source),
            AppError::InternalWithSource { message, source } => {
                format!("{}: {}", message, source)
            }
            other => other.to_string(),
        }
    }
}
