//! Error types module
//!
//! All errors surfaced by Photospective components are unified under the `AppError` enum.
//! Lower layers (processing, storage) define their own `thiserror` enums and convert into
//! `AppError` at the crate boundary.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like unreadable uploads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the caller.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Process exit code used by command-line front ends
    fn exit_code(&self) -> i32;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

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

#[cfg(feature = "sqlx")]
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

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, log_level, exit_code).
fn app_error_static_metadata(err: &AppError) -> (&'static str, LogLevel, i32) {
    match err {
        AppError::Database(_) => ("DATABASE_ERROR", LogLevel::Error, 3),
        AppError::Storage(_) => ("STORAGE_ERROR", LogLevel::Error, 3),
        AppError::ImageProcessing(_) => ("IMAGE_PROCESSING_ERROR", LogLevel::Warn, 2),
        AppError::InvalidInput(_) => ("INVALID_INPUT", LogLevel::Debug, 2),
        AppError::NotFound(_) => ("NOT_FOUND", LogLevel::Debug, 4),
        AppError::PayloadTooLarge(_) => ("PAYLOAD_TOO_LARGE", LogLevel::Debug, 2),
        AppError::Internal(_) => ("INTERNAL_ERROR", LogLevel::Error, 1),
        AppError::InternalWithSource { .. } => ("INTERNAL_ERROR", LogLevel::Error, 1),
    }
}

impl AppError {
    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).1
    }

    fn exit_code(&self) -> i32 {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access media storage".to_string(),
            AppError::ImageProcessing(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal error".to_string(),
            AppError::InternalWithSource { .. } => "Internal error".to_string(),
        }
    }
}
