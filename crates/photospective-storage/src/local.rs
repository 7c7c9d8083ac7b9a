use crate::keys::{suffixed_filename, user_upload_key};
use crate::traits::{MediaStorage, StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Upper bound on name suffixes tried before an upload is refused
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Local filesystem storage rooted at the media directory
#[derive(Clone, Debug)]
pub struct LocalMediaStorage {
    base_path: PathBuf,
}

impl LocalMediaStorage {
    /// Create the storage, creating `base_path` if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalMediaStorage { base_path })
    }

    /// Convert storage key to filesystem path with security validation
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty() || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let relative = Path::new(storage_key);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }

        let path = self.base_path.join(relative);

        // Symlinks inside the media root must not lead out of it
        if let (Ok(canonical), Ok(base_canonical)) =
            (path.canonicalize(), self.base_path.canonicalize())
        {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Create a file that did not exist before, returning its key and handle.
    async fn create_unique(
        &self,
        user_id: i64,
        filename: &str,
    ) -> StorageResult<(String, PathBuf, fs::File)> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let key = user_upload_key(user_id, &suffixed_filename(filename, attempt));
            let path = self.key_to_path(&key)?;
            self.ensure_parent_dir(&path).await?;

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((key, path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(StorageError::UploadFailed(format!(
            "No free name for {} after {} attempts",
            filename, MAX_NAME_ATTEMPTS
        )))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store_upload(
        &self,
        user_id: i64,
        filename: &str,
        data: &[u8],
    ) -> StorageResult<String> {
        let start = std::time::Instant::now();
        let (key, path, mut file) = self.create_unique(user_id, filename).await?;

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            // Do not leave a truncated file behind
            let _ = fs::remove_file(&path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(key)
    }

    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    key = %storage_key,
                    "Local storage delete successful"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn local_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        self.key_to_path(storage_key)
    }
}
