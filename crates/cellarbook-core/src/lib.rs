//! Cellarbook Core Library
//!
//! Configuration, the ingestion error taxonomy, domain models and constants
//! shared by the storage, processing and CLI crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{
    BaseConfig, BoundingBox, Config, IngestSettings, RenditionSettings, SettingsProvider,
    SharedSettings, StorageDirs,
};
pub use error::{ConfigError, ErrorMetadata, IngestionError, LogLevel};
pub use models::{StoredAssetPair, UploadCandidate, UploadStream};
