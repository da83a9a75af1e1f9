//! Upload ingestion: name allocation and the ingestion pipeline.

pub mod naming;
pub mod pipeline;

pub use naming::{sanitize_filename, AllocatedNames, AssetNameAllocator};
pub use pipeline::ImageIngestionPipeline;
