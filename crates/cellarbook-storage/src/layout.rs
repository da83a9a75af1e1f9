//! Mapping between logical asset paths and physical files.
//!
//! Logical layout: `uploads/{name}` for primary images and
//! `uploads/thumbnails/{thumb_name}` for thumbnails. Physical layout:
//! `{upload_dir}/{name}` and `{thumbnail_dir}/{thumb_name}`, where both
//! directories come from the settings current at call time.

use std::path::PathBuf;

use cellarbook_core::constants::{THUMBNAILS_PREFIX, UPLOADS_PREFIX};
use cellarbook_core::StorageDirs;

use crate::traits::{StorageError, StorageResult};

/// Physical destination of a freshly allocated primary image.
pub fn primary_destination(dirs: &StorageDirs, name: &str) -> PathBuf {
    dirs.upload_dir.join(name)
}

/// Physical destination of a freshly allocated thumbnail.
pub fn thumbnail_destination(dirs: &StorageDirs, name: &str) -> PathBuf {
    dirs.thumbnail_dir.join(name)
}

/// Resolve a primary image's logical path against the current upload directory.
///
/// Paths without the `uploads/` prefix are taken to be filesystem paths
/// recorded before logical paths existed and are returned unchanged.
pub fn resolve_primary(logical_path: &str, dirs: &StorageDirs) -> StorageResult<PathBuf> {
    resolve(logical_path, UPLOADS_PREFIX, &dirs.upload_dir)
}

/// Resolve a thumbnail's logical path against the current thumbnail directory.
pub fn resolve_thumbnail(logical_path: &str, dirs: &StorageDirs) -> StorageResult<PathBuf> {
    resolve(logical_path, THUMBNAILS_PREFIX, &dirs.thumbnail_dir)
}

fn resolve(logical_path: &str, prefix: &str, dir: &std::path::Path) -> StorageResult<PathBuf> {
    match logical_path.strip_prefix(prefix) {
        Some(name) => {
            validate_name(name)?;
            Ok(dir.join(name))
        }
        None => Ok(PathBuf::from(logical_path)),
    }
}

/// A stored name is a single path component: no separators, no traversal.
fn validate_name(name: &str) -> StorageResult<()> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name == ".."
        || name == "."
    {
        return Err(StorageError::InvalidPath(name.to_string()));
    }
    Ok(())
}
