//! Domain error types for the streak analyzer.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! The analysis engine itself never fails; every variant here originates in
//! configuration or in a record source.

use crate::config::ConfigError;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Reading a record export failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid input data (malformed records, bad arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
