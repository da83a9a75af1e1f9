use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cellarbook_core::constants::THUMBNAIL_NAME_PREFIX;
use cellarbook_storage::{AssetStore, LocalAssetStore, StorageError, StorageResult};
use tokio::sync::Notify;

fn is_thumbnail(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(THUMBNAIL_NAME_PREFIX))
        .unwrap_or(false)
}

/// Local store that refuses to write thumbnails.
#[derive(Default)]
pub struct FailingThumbnailStore {
    inner: LocalAssetStore,
    pub attempted_writes: AtomicUsize,
}

impl FailingThumbnailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.attempted_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for FailingThumbnailStore {
    async fn write(&self, path: &Path, data: Vec<u8>) -> StorageResult<()> {
        self.attempted_writes.fetch_add(1, Ordering::SeqCst);
        if is_thumbnail(path) {
            return Err(StorageError::WriteFailed("simulated disk full".to_string()));
        }
        self.inner.write(path, data).await
    }

    async fn remove(&self, path: &Path) -> StorageResult<bool> {
        self.inner.remove(path).await
    }

    async fn exists(&self, path: &Path) -> StorageResult<bool> {
        self.inner.exists(path).await
    }
}

/// Local store whose thumbnail writes stall for `delay` before landing.
///
/// `thumbnail_started` is notified when a thumbnail write begins and
/// `thumbnail_written` once it has finished.
pub struct SlowThumbnailStore {
    inner: LocalAssetStore,
    delay: Duration,
    pub thumbnail_started: Notify,
    pub thumbnail_written: Notify,
}

impl SlowThumbnailStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: LocalAssetStore::new(),
            delay,
            thumbnail_started: Notify::new(),
            thumbnail_written: Notify::new(),
        }
    }
}

#[async_trait]
impl AssetStore for SlowThumbnailStore {
    async fn write(&self, path: &Path, data: Vec<u8>) -> StorageResult<()> {
        if !is_thumbnail(path) {
            return self.inner.write(path, data).await;
        }
        self.thumbnail_started.notify_one();
        tokio::time::sleep(self.delay).await;
        let result = self.inner.write(path, data).await;
        self.thumbnail_written.notify_one();
        result
    }

    async fn remove(&self, path: &Path) -> StorageResult<bool> {
        self.inner.remove(path).await
    }

    async fn exists(&self, path: &Path) -> StorageResult<bool> {
        self.inner.exists(path).await
    }
}
