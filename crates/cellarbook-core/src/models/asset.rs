//! Durable result of a successful ingestion.

use serde::{Deserialize, Serialize};

use crate::constants::{THUMBNAILS_PREFIX, UPLOADS_PREFIX};

/// The (primary image, thumbnail image) logical paths produced together for
/// one catalog record's photo.
///
/// Both paths are storage-namespace relative (`uploads/...`), never absolute
/// filesystem paths. The catalog record owns the pair; it is created right
/// before the record is persisted and reaped when the record lets go of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredAssetPair {
    pub primary_path: String,
    pub thumbnail_path: String,
}

impl StoredAssetPair {
    /// Build the pair from the allocated on-disk filenames.
    pub fn from_names(primary_name: &str, thumbnail_name: &str) -> Self {
        Self {
            primary_path: format!("{}{}", UPLOADS_PREFIX, primary_name),
            thumbnail_path: format!("{}{}", THUMBNAILS_PREFIX, thumbnail_name),
        }
    }
}
