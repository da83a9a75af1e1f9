//! Cellarbook Storage Library
//!
//! This crate provides the asset storage abstraction and its local filesystem
//! implementation, plus the logical-path layout shared by the ingestion
//! pipeline and the reaper.
//!
//! # Layout
//!
//! - **Primary images**: logical `uploads/{name}`, physical `{upload_dir}/{name}`
//! - **Thumbnails**: logical `uploads/thumbnails/{name}`, physical `{thumbnail_dir}/{name}`
//!
//! Stored names are single path components. Path resolution is centralized in
//! the `layout` module so writers and deleters stay consistent.

pub mod cleanup;
pub mod layout;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use cleanup::{remove_best_effort, CleanupOutcome};
pub use local::LocalAssetStore;
pub use traits::{AssetStore, StorageError, StorageResult};
