use crate::traits::{AssetStore, StorageError, StorageResult};
use async_trait::async_trait;
use cellarbook_core::StorageDirs;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem asset storage
#[derive(Clone, Debug, Default)]
pub struct LocalAssetStore;

impl LocalAssetStore {
    pub fn new() -> Self {
        LocalAssetStore
    }

    /// Create both storage directories if they don't exist.
    pub async fn ensure_dirs(&self, dirs: &StorageDirs) -> StorageResult<()> {
        for dir in [&dirs.upload_dir, &dirs.thumbnail_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn write(&self, path: &Path, data: Vec<u8>) -> StorageResult<()> {
        let size = data.len();

        self.ensure_parent_dir(path).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create parent directory of {}: {}",
                path.display(),
                e
            ))
        })?;

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.display().to_string()),
                _ => StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )),
            })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local asset write successful"
        );

        Ok(())
    }

    async fn remove(&self, path: &Path) -> StorageResult<bool> {
        let start = std::time::Instant::now();

        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local asset delete successful"
                );
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, path: &Path) -> StorageResult<bool> {
        Ok(fs::try_exists(path).await?)
    }
}
