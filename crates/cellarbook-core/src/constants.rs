//! Application-wide constants.

/// Logical namespace every stored primary image lives under.
pub const UPLOADS_PREFIX: &str = "uploads/";

/// Logical namespace every stored thumbnail lives under.
pub const THUMBNAILS_PREFIX: &str = "uploads/thumbnails/";

/// Prefix prepended to the primary filename to name its thumbnail.
pub const THUMBNAIL_NAME_PREFIX: &str = "thumb_";

/// Source extensions accepted by default.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "heic", "heif"];

/// Source extensions that are always re-encoded and stored with a `.jpg` suffix.
pub const REENCODE_EXTENSIONS: [&str; 3] = ["heic", "heif", "png"];

/// Extension given to re-encoded output.
pub const JPEG_EXTENSION: &str = "jpg";

pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
pub const DEFAULT_THUMBNAIL_FOLDER: &str = "uploads/thumbnails";

/// 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_IMAGE_MAX_WIDTH: u32 = 1200;
pub const DEFAULT_IMAGE_MAX_HEIGHT: u32 = 1200;
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 300;
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 300;
pub const DEFAULT_IMAGE_QUALITY: u8 = 85;
pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 75;
