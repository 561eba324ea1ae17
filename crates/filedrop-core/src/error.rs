//! Error types module
//!
//! All errors served over HTTP are unified under the `AppError` enum. Errors
//! raised inside the background relocation task never reach a caller; they are
//! recorded on the upload row and surface only through a later status query.

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Database(_) => 500,
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message. Database and internal details stay out of
    /// responses; they are logged instead.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Whether the full error detail is safe to include in a response body.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Internal(_))
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Database(_) | AppError::Internal(_) => LogLevel::Error,
            AppError::InvalidInput(_) | AppError::NotFound(_) => LogLevel::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Upload not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.client_message(), "Upload not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_invalid_input() {
        let err = AppError::InvalidInput("uploadID is required".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.client_message(), "uploadID is required");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_io_error_is_internal() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(io_err);
        match err {
            AppError::Internal(msg) => assert!(msg.contains("denied")),
            _ => panic!("Expected Internal variant"),
        }
    }
}
