//! Image ingestion pipeline: validate → read → process → store.
//!
//! One call turns an [`UploadCandidate`] into a [`StoredAssetPair`], or fails
//! leaving nothing of its own on disk. Settings are read from the provider at
//! the start of every call, so directory relocation between calls is honored.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use cellarbook_core::{
    ErrorMetadata, IngestSettings, IngestionError, LogLevel, SettingsProvider, StoredAssetPair,
    UploadCandidate,
};
use cellarbook_storage::layout::{primary_destination, thumbnail_destination};
use cellarbook_storage::{remove_best_effort, AssetStore, LocalAssetStore, StorageError};
use tokio::io::AsyncReadExt;

use super::naming::{AllocatedNames, AssetNameAllocator};
use crate::image::{ImageProcessor, ProcessingError, RenderedPair, Rendition};
use crate::validator::UploadValidator;

/// Turns uploads into stored primary/thumbnail JPEG pairs.
///
/// Cheap to clone; every clone shares the same settings provider and store.
/// Calls are independent and may run concurrently.
#[derive(Clone)]
pub struct ImageIngestionPipeline {
    settings: Arc<dyn SettingsProvider>,
    store: Arc<dyn AssetStore>,
    allocator: AssetNameAllocator,
}

impl ImageIngestionPipeline {
    pub fn new(settings: Arc<dyn SettingsProvider>, store: Arc<dyn AssetStore>) -> Self {
        Self {
            settings,
            store,
            allocator: AssetNameAllocator::new(),
        }
    }

    /// Pipeline writing to the local filesystem.
    pub fn local(settings: Arc<dyn SettingsProvider>) -> Self {
        Self::new(settings, Arc::new(LocalAssetStore::new()))
    }

    /// Ingest one upload.
    ///
    /// On success both files exist under the directories current at call
    /// time. On failure neither file created by this call remains.
    pub async fn ingest(
        &self,
        candidate: Option<UploadCandidate>,
    ) -> Result<StoredAssetPair, IngestionError> {
        let result = self.run(candidate).await;

        if let Err(e) = &result {
            match e.log_level() {
                LogLevel::Debug => {
                    tracing::debug!(error = %e, code = e.error_code(), "Upload rejected")
                }
                LogLevel::Warn => {
                    tracing::warn!(error = %e, code = e.error_code(), "Upload rejected")
                }
                LogLevel::Error => {
                    tracing::error!(error = %e, code = e.error_code(), "Image ingestion failed")
                }
            }
        }
        result
    }

    async fn run(
        &self,
        candidate: Option<UploadCandidate>,
    ) -> Result<StoredAssetPair, IngestionError> {
        let start = Instant::now();

        let candidate = match candidate {
            Some(c) if !c.filename().trim().is_empty() => c,
            _ => return Err(IngestionError::NoFile),
        };

        let settings = self.settings.settings();
        let validator = UploadValidator::new(&settings);

        let extension = validator
            .validate_extension(candidate.filename())
            .map_err(|e| IngestionError::UnsupportedType {
                extension: e.extension().map(str::to_string),
            })?;
        validator.check_content_type(&extension, candidate.content_type());

        let names = self.allocator.allocate(candidate.filename(), &extension);
        tracing::debug!(
            original_name = %candidate.filename(),
            primary_name = %names.primary,
            "Allocated asset names"
        );

        let data = read_body(candidate, settings.max_upload_bytes).await?;
        let size_bytes = data.len();

        let rendered = render(data, &settings).await.map_err(|e| match e {
            ProcessingError::Decode(reason) => IngestionError::DecodeFailure(reason),
            ProcessingError::Encode { rendition, source } => {
                let path = match rendition {
                    Rendition::Primary => primary_destination(&settings.dirs, &names.primary),
                    Rendition::Thumbnail => {
                        thumbnail_destination(&settings.dirs, &names.thumbnail)
                    }
                };
                IngestionError::write(&path, source)
            }
        })?;

        self.persist(&settings, &names, rendered).await?;

        let pair = StoredAssetPair::from_names(&names.primary, &names.thumbnail);
        tracing::info!(
            primary_path = %pair.primary_path,
            thumbnail_path = %pair.thumbnail_path,
            size_bytes = size_bytes,
            duration_ms = start.elapsed().as_millis() as u64,
            "Image ingested"
        );
        Ok(pair)
    }

    /// Write the primary then the thumbnail. If either write fails, every
    /// file this call created is removed before the error is returned.
    ///
    /// The writes run on their own task, so dropping the `ingest` future
    /// mid-persist still finishes the pair or unwinds it.
    async fn persist(
        &self,
        settings: &IngestSettings,
        names: &AllocatedNames,
        rendered: RenderedPair,
    ) -> Result<(), IngestionError> {
        let primary_path = primary_destination(&settings.dirs, &names.primary);
        let thumbnail_path = thumbnail_destination(&settings.dirs, &names.thumbnail);
        let outputs = [
            (primary_path.clone(), rendered.primary),
            (thumbnail_path, rendered.thumbnail),
        ];

        tokio::spawn(write_pair(Arc::clone(&self.store), outputs))
            .await
            .map_err(|e| IngestionError::write(&primary_path, e))?
    }
}

async fn write_pair(
    store: Arc<dyn AssetStore>,
    outputs: [(PathBuf, Vec<u8>); 2],
) -> Result<(), IngestionError> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(2);

    for (path, data) in outputs {
        match store.write(&path, data).await {
            Ok(()) => written.push(path),
            Err(e) => {
                // A file that already existed is not ours to delete.
                if !matches!(e, StorageError::AlreadyExists(_)) {
                    written.push(path.clone());
                }
                unwind(store.as_ref(), &written).await;
                return Err(IngestionError::write(&path, e));
            }
        }
    }

    Ok(())
}

async fn unwind(store: &dyn AssetStore, paths: &[PathBuf]) {
    for path in paths {
        tracing::warn!(path = %path.display(), "Removing partial ingestion output");
        remove_best_effort(store, path).await;
    }
}

impl std::fmt::Debug for ImageIngestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageIngestionPipeline")
            .field("settings", &self.settings.settings())
            .finish_non_exhaustive()
    }
}

/// Read at most `max` bytes of the body; anything longer is rejected.
async fn read_body(candidate: UploadCandidate, max: usize) -> Result<Vec<u8>, IngestionError> {
    let limit = (max as u64).saturating_add(1);
    let mut data = Vec::new();
    candidate
        .into_body()
        .take(limit)
        .read_to_end(&mut data)
        .await
        .map_err(IngestionError::decode)?;

    if data.len() > max {
        return Err(IngestionError::PayloadTooLarge { max });
    }
    Ok(data)
}

/// Run the CPU-bound stage on the blocking pool; it must not stall the runtime.
async fn render(data: Vec<u8>, settings: &IngestSettings) -> Result<RenderedPair, ProcessingError> {
    let settings = settings.clone();
    tokio::task::spawn_blocking(move || ImageProcessor::render_pair(&data, &settings))
        .await
        .map_err(|e| ProcessingError::Decode(format!("Image processing task failed: {}", e)))?
}
