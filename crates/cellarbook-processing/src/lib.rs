//! Cellarbook Processing Library
//!
//! Image ingestion and cleanup for catalog photos:
//! - [`ImageIngestionPipeline`] turns an upload into a stored primary/thumbnail JPEG pair
//! - [`AssetNameAllocator`] picks collision-free stored names
//! - [`AssetReaper`] deletes a stored pair, best effort
//! - [`AssetLifecycle`] ties both to a caller's record writes

pub mod compression;
pub mod image;
pub mod lifecycle;
pub mod reaper;
pub mod upload;
pub mod validator;

pub use image::{ImageOrientation, ImageProcessor, RenderedPair, Rendition};
pub use lifecycle::{AssetLifecycle, LifecycleError};
pub use reaper::AssetReaper;
pub use upload::{sanitize_filename, AllocatedNames, AssetNameAllocator, ImageIngestionPipeline};
pub use validator::{UploadValidator, ValidationError};
