#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use cellarbook_core::{IngestSettings, SettingsProvider, StorageDirs};
use tempfile::TempDir;

/// Settings whose storage directories live inside `dir`.
pub fn settings_in(dir: &Path) -> IngestSettings {
    IngestSettings::default().with_dirs(dirs_in(dir))
}

pub fn dirs_in(dir: &Path) -> StorageDirs {
    StorageDirs::new(dir.join("uploads"), dir.join("uploads").join("thumbnails"))
}

pub fn provider_in(dir: &TempDir) -> Arc<dyn SettingsProvider> {
    Arc::new(settings_in(dir.path()))
}

/// Number of regular files directly inside `dir`; a missing directory counts as empty.
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}

/// Physical location of a logical `uploads/...` path under `dirs`.
pub fn physical_primary(dirs: &StorageDirs, logical: &str) -> std::path::PathBuf {
    dirs.upload_dir
        .join(logical.strip_prefix("uploads/").expect("primary prefix"))
}

pub fn physical_thumbnail(dirs: &StorageDirs, logical: &str) -> std::path::PathBuf {
    dirs.thumbnail_dir.join(
        logical
            .strip_prefix("uploads/thumbnails/")
            .expect("thumbnail prefix"),
    )
}
