use super::{color::flatten_to_rgb, decode::decode_upright, resize::ImageResize};
use crate::compression::{encode_jpeg, CompressionError};
use cellarbook_core::{IngestSettings, RenditionSettings};
use image::{GenericImageView, RgbImage};
use std::fmt;

/// Which of the two stored outputs a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendition {
    Primary,
    Thumbnail,
}

impl fmt::Display for Rendition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendition::Primary => write!(f, "primary"),
            Rendition::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode {rendition} image: {source}")]
    Encode {
        rendition: Rendition,
        #[source]
        source: CompressionError,
    },
}

/// JPEG bytes for both renditions of one upload.
#[derive(Debug)]
pub struct RenderedPair {
    pub primary: Vec<u8>,
    pub thumbnail: Vec<u8>,
}

/// CPU-bound half of ingestion: decode, orient, flatten, resize, encode.
///
/// All methods are synchronous; callers run them on a blocking thread.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Produce the primary and thumbnail JPEGs for `data`.
    ///
    /// Both renditions are derived from the same upright source, so the
    /// thumbnail never inherits the primary's resampling.
    pub fn render_pair(
        data: &[u8],
        settings: &IngestSettings,
    ) -> Result<RenderedPair, ProcessingError> {
        let img = decode_upright(data).map_err(ProcessingError::Decode)?;
        let (width, height) = img.dimensions();
        tracing::debug!(width, height, color = ?img.color(), "Decoded image");

        let source = flatten_to_rgb(img);

        let primary = Self::render(source.clone(), &settings.primary, Rendition::Primary)?;
        let thumbnail = Self::render(source, &settings.thumbnail, Rendition::Thumbnail)?;

        Ok(RenderedPair { primary, thumbnail })
    }

    fn render(
        source: RgbImage,
        settings: &RenditionSettings,
        rendition: Rendition,
    ) -> Result<Vec<u8>, ProcessingError> {
        let resized = ImageResize::fit_within(source, settings.bounds);
        encode_jpeg(&resized, settings.quality)
            .map_err(|source| ProcessingError::Encode { rendition, source })
    }
}
