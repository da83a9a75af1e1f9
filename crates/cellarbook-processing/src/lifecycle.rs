//! Ties a catalog record's persistence to the ingestion and reaping of its photo.
//!
//! A record write is only attempted once ingestion has succeeded. If the
//! write then fails, the freshly stored pair is reaped so no orphan remains.
//! A replaced pair is reaped only after the new record is persisted.

use std::future::Future;

use cellarbook_core::{IngestionError, StoredAssetPair, UploadCandidate};

use crate::reaper::AssetReaper;
use crate::upload::ImageIngestionPipeline;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError<E> {
    #[error("Image ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Failed to persist record: {0}")]
    Persist(#[source] E),
}

/// Coordinates the pipeline and reaper around a caller's record writes.
#[derive(Debug, Clone)]
pub struct AssetLifecycle {
    pipeline: ImageIngestionPipeline,
    reaper: AssetReaper,
}

impl AssetLifecycle {
    pub fn new(pipeline: ImageIngestionPipeline, reaper: AssetReaper) -> Self {
        Self { pipeline, reaper }
    }

    pub fn pipeline(&self) -> &ImageIngestionPipeline {
        &self.pipeline
    }

    pub fn reaper(&self) -> &AssetReaper {
        &self.reaper
    }

    /// Ingest `candidate` (if any) and hand the resulting pair to `persist`.
    ///
    /// With no candidate the record is persisted without a photo. If
    /// `persist` fails the new pair is reaped.
    pub async fn create_with<T, E, F, Fut>(
        &self,
        candidate: Option<UploadCandidate>,
        persist: F,
    ) -> Result<T, LifecycleError<E>>
    where
        F: FnOnce(Option<StoredAssetPair>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let pair = match candidate {
            Some(candidate) => Some(self.pipeline.ingest(Some(candidate)).await?),
            None => None,
        };

        self.commit_or_reap(pair, persist).await
    }

    /// Replace a record's photo.
    ///
    /// The new pair is ingested and persisted first; only then is `previous`
    /// reaped. If ingestion or persistence fails, `previous` is left untouched.
    pub async fn replace_with<T, E, F, Fut>(
        &self,
        previous: Option<&StoredAssetPair>,
        candidate: UploadCandidate,
        persist: F,
    ) -> Result<T, LifecycleError<E>>
    where
        F: FnOnce(Option<StoredAssetPair>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let pair = self.pipeline.ingest(Some(candidate)).await?;
        let value = self.commit_or_reap(Some(pair), persist).await?;

        if let Some(previous) = previous {
            self.reaper.delete_pair(previous).await;
        }
        Ok(value)
    }

    /// Reap a pair whose record has been deleted.
    pub async fn discard(&self, pair: Option<&StoredAssetPair>) {
        if let Some(pair) = pair {
            self.reaper.delete_pair(pair).await;
        }
    }

    async fn commit_or_reap<T, E, F, Fut>(
        &self,
        pair: Option<StoredAssetPair>,
        persist: F,
    ) -> Result<T, LifecycleError<E>>
    where
        F: FnOnce(Option<StoredAssetPair>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match persist(pair.clone()).await {
            Ok(value) => Ok(value),
            Err(e) => {
                if let Some(pair) = &pair {
                    tracing::warn!(
                        primary_path = %pair.primary_path,
                        "Record persistence failed, reaping its new image"
                    );
                    self.reaper.delete_pair(pair).await;
                }
                Err(LifecycleError::Persist(e))
            }
        }
    }
}
