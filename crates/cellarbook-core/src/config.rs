//! Configuration module
//!
//! This module provides the settings the ingestion pipeline and reaper read at
//! call time, the environment loader that produces them, and the
//! [`SettingsProvider`] seam through which they are injected.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::constants::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_IMAGE_MAX_HEIGHT, DEFAULT_IMAGE_MAX_WIDTH,
    DEFAULT_IMAGE_QUALITY, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_THUMBNAIL_FOLDER,
    DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_QUALITY, DEFAULT_THUMBNAIL_WIDTH,
    DEFAULT_UPLOAD_FOLDER,
};
use crate::error::ConfigError;

/// Physical directories the two asset classes are written to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StorageDirs {
    pub upload_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
}

impl StorageDirs {
    pub fn new(upload_dir: impl Into<PathBuf>, thumbnail_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            thumbnail_dir: thumbnail_dir.into(),
        }
    }
}

impl Default for StorageDirs {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_FOLDER, DEFAULT_THUMBNAIL_FOLDER)
    }
}

/// Maximum (width, height) an output raster may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

/// Size ceiling and JPEG quality for one derived asset class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RenditionSettings {
    pub bounds: BoundingBox,
    /// JPEG quality, 0-100
    pub quality: u8,
}

/// Everything the ingestion pipeline and the reaper need for one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IngestSettings {
    /// Lowercase source extensions accepted by the extension gate.
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
    pub dirs: StorageDirs,
    pub primary: RenditionSettings,
    pub thumbnail: RenditionSettings,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            dirs: StorageDirs::default(),
            primary: RenditionSettings {
                bounds: BoundingBox::new(DEFAULT_IMAGE_MAX_WIDTH, DEFAULT_IMAGE_MAX_HEIGHT),
                quality: DEFAULT_IMAGE_QUALITY,
            },
            thumbnail: RenditionSettings {
                bounds: BoundingBox::new(DEFAULT_THUMBNAIL_WIDTH, DEFAULT_THUMBNAIL_HEIGHT),
                quality: DEFAULT_THUMBNAIL_QUALITY,
            },
        }
    }
}

impl IngestSettings {
    /// Same settings rooted at different storage directories.
    pub fn with_dirs(mut self, dirs: StorageDirs) -> Self {
        self.dirs = dirs;
        self
    }

    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::invalid(
                "ALLOWED_EXTENSIONS",
                "at least one extension must be allowed",
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::invalid(
                "MAX_CONTENT_LENGTH",
                "must be greater than zero",
            ));
        }
        if self.dirs.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("UPLOAD_FOLDER", "must not be empty"));
        }
        if self.dirs.thumbnail_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("THUMBNAIL_FOLDER", "must not be empty"));
        }
        validate_rendition("IMAGE", &self.primary)?;
        validate_rendition("THUMBNAIL", &self.thumbnail)?;
        Ok(())
    }
}

fn validate_rendition(prefix: &'static str, rendition: &RenditionSettings) -> Result<(), ConfigError> {
    if rendition.bounds.width == 0 || rendition.bounds.height == 0 {
        return Err(ConfigError::InvalidValue {
            key: format!("{}_WIDTH/{}_HEIGHT", prefix, prefix),
            reason: "bounding box dimensions must be greater than zero".to_string(),
        });
    }
    if rendition.quality > 100 {
        return Err(ConfigError::InvalidValue {
            key: format!("{}_QUALITY", prefix),
            reason: format!("{} is outside 0-100", rendition.quality),
        });
    }
    Ok(())
}

/// Source of [`IngestSettings`], consulted at the start of every call so that
/// directory relocation between calls is honored.
pub trait SettingsProvider: Send + Sync {
    fn settings(&self) -> IngestSettings;
}

impl SettingsProvider for IngestSettings {
    fn settings(&self) -> IngestSettings {
        self.clone()
    }
}

/// Settings that can be swapped while pipelines holding them are alive.
#[derive(Clone, Debug, Default)]
pub struct SharedSettings(Arc<RwLock<IngestSettings>>);

impl SharedSettings {
    pub fn new(settings: IngestSettings) -> Self {
        Self(Arc::new(RwLock::new(settings)))
    }

    /// Point subsequent calls at new storage directories.
    pub fn relocate(&self, dirs: StorageDirs) {
        self.update(|settings| settings.dirs = dirs);
    }

    pub fn update(&self, f: impl FnOnce(&mut IngestSettings)) {
        let mut guard = self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

impl SettingsProvider for SharedSettings {
    fn settings(&self) -> IngestSettings {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Process settings not tied to ingestion.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub environment: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub ingest: IngestSettings,
}

impl Config {
    /// Load `.env` (if present) and read configuration from the environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.join(","))
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            base: BaseConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            },
            ingest: IngestSettings {
                allowed_extensions,
                max_upload_bytes: env_or("MAX_CONTENT_LENGTH", DEFAULT_MAX_UPLOAD_BYTES),
                dirs: StorageDirs::new(
                    env::var("UPLOAD_FOLDER").unwrap_or_else(|_| DEFAULT_UPLOAD_FOLDER.to_string()),
                    env::var("THUMBNAIL_FOLDER")
                        .unwrap_or_else(|_| DEFAULT_THUMBNAIL_FOLDER.to_string()),
                ),
                primary: RenditionSettings {
                    bounds: BoundingBox::new(
                        env_or("IMAGE_MAX_WIDTH", DEFAULT_IMAGE_MAX_WIDTH),
                        env_or("IMAGE_MAX_HEIGHT", DEFAULT_IMAGE_MAX_HEIGHT),
                    ),
                    quality: env_or("IMAGE_QUALITY", DEFAULT_IMAGE_QUALITY),
                },
                thumbnail: RenditionSettings {
                    bounds: BoundingBox::new(
                        env_or("THUMBNAIL_WIDTH", DEFAULT_THUMBNAIL_WIDTH),
                        env_or("THUMBNAIL_HEIGHT", DEFAULT_THUMBNAIL_HEIGHT),
                    ),
                    quality: env_or("THUMBNAIL_QUALITY", DEFAULT_THUMBNAIL_QUALITY),
                },
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.ingest.validate()?;
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn dirs(&self) -> &StorageDirs {
        &self.ingest.dirs
    }
}

impl SettingsProvider for Config {
    fn settings(&self) -> IngestSettings {
        self.ingest.clone()
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed.
fn env_or<T: FromStr + ToString>(key: &str, default: T) -> T {
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T: FromStr + ToString>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(
                key = key,
                value = %raw,
                default = %default.to_string(),
                "Invalid configuration value, using default"
            );
            default
        }
    }
}
