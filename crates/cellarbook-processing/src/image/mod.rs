//! Image processing module
//!
//! This module provides the decode-to-JPEG stage of ingestion:
//! - Content-sniffed decoding, including HEIF behind the `heif` feature (decode, heif)
//! - EXIF orientation (orientation)
//! - Alpha flattening (color) and bounded resizing (resize)
//! - Rendering both stored renditions (processor)

pub mod color;
pub mod decode;
#[cfg(feature = "heif")]
pub mod heif;
pub mod orientation;
pub mod processor;
pub mod resize;

pub use orientation::ImageOrientation;
pub use processor::{ImageProcessor, ProcessingError, RenderedPair, Rendition};
pub use resize::ImageResize;
