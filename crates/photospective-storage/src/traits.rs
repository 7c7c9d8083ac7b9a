//! Storage abstraction trait

use async_trait::async_trait;
use photospective_core::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage for uploaded photos
///
/// Photos are normalized and inspected in place, so every backend must be able to hand
/// out a local filesystem path for a key.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `data` in the upload area of `user_id` and return the storage key.
    ///
    /// Existing files are never overwritten; a free name is chosen instead.
    async fn store_upload(&self, user_id: i64, filename: &str, data: &[u8])
        -> StorageResult<String>;

    /// Read a stored file
    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a stored file. Missing files are not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Filesystem path of a key
    fn local_path(&self, storage_key: &str) -> StorageResult<PathBuf>;
}
