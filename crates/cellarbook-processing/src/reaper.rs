//! Best-effort deletion of stored asset pairs.

use std::path::PathBuf;
use std::sync::Arc;

use cellarbook_core::{IngestSettings, SettingsProvider, StorageDirs, StoredAssetPair};
use cellarbook_storage::layout::{resolve_primary, resolve_thumbnail};
use cellarbook_storage::{remove_best_effort, AssetStore, LocalAssetStore, StorageResult};

/// Deletes the files behind a stored pair.
///
/// Never fails from the caller's point of view: missing files, invalid paths
/// and removal errors are logged and skipped. Deleting the same pair twice is
/// the same as deleting it once.
#[derive(Clone)]
pub struct AssetReaper {
    settings: Option<Arc<dyn SettingsProvider>>,
    store: Arc<dyn AssetStore>,
}

impl AssetReaper {
    /// `settings` of `None` resolves paths against the default directories.
    pub fn new(settings: Option<Arc<dyn SettingsProvider>>, store: Arc<dyn AssetStore>) -> Self {
        Self { settings, store }
    }

    /// Reaper removing from the local filesystem.
    pub fn local(settings: Option<Arc<dyn SettingsProvider>>) -> Self {
        Self::new(settings, Arc::new(LocalAssetStore::new()))
    }

    /// Delete whichever of the two files are named. Absent or blank paths are skipped.
    pub async fn delete(&self, primary_path: Option<&str>, thumbnail_path: Option<&str>) {
        let dirs = self.current_dirs();

        if let Some(path) = non_blank(primary_path) {
            self.remove(path, resolve_primary(path, &dirs)).await;
        }
        if let Some(path) = non_blank(thumbnail_path) {
            self.remove(path, resolve_thumbnail(path, &dirs)).await;
        }
    }

    pub async fn delete_pair(&self, pair: &StoredAssetPair) {
        self.delete(Some(&pair.primary_path), Some(&pair.thumbnail_path))
            .await;
    }

    fn current_dirs(&self) -> StorageDirs {
        match &self.settings {
            Some(provider) => provider.settings().dirs,
            None => IngestSettings::default().dirs,
        }
    }

    async fn remove(&self, logical_path: &str, resolved: StorageResult<PathBuf>) {
        match resolved {
            Ok(path) => {
                tracing::debug!(
                    logical_path = %logical_path,
                    path = %path.display(),
                    "Reaping asset file"
                );
                remove_best_effort(self.store.as_ref(), &path).await;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    logical_path = %logical_path,
                    "Skipping asset path that does not resolve to a stored file"
                );
            }
        }
    }
}

impl std::fmt::Debug for AssetReaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetReaper")
            .field("dirs", &self.current_dirs())
            .finish_non_exhaustive()
    }
}

fn non_blank(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.trim().is_empty())
}
