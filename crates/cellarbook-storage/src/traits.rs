//! Storage abstraction trait
//!
//! This module defines the AssetStore trait that asset backends implement.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Physical asset storage.
///
/// Paths are filesystem paths already resolved against the configured
/// directories; logical `uploads/...` paths never reach a store.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write a new file, creating missing parent directories.
    ///
    /// Never overwrites: an existing file yields [`StorageError::AlreadyExists`]
    /// and is left untouched.
    async fn write(&self, path: &Path, data: Vec<u8>) -> StorageResult<()>;

    /// Remove a file. Returns `false` if there was nothing to remove.
    async fn remove(&self, path: &Path) -> StorageResult<bool>;

    /// Check if a file exists
    async fn exists(&self, path: &Path) -> StorageResult<bool>;
}
