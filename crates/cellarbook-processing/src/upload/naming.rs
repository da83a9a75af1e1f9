use crate::validator::declared_extension;
use cellarbook_core::constants::{JPEG_EXTENSION, REENCODE_EXTENSIONS, THUMBNAIL_NAME_PREFIX};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Longest sanitized filename kept before the token is prepended.
const MAX_SANITIZED_LEN: usize = 200;

/// Used when sanitizing leaves nothing behind.
const PLACEHOLDER_STEM: &str = "upload";

/// Stored names for one upload. Both are single path components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedNames {
    pub primary: String,
    pub thumbnail: String,
}

/// Allocates collision-free stored names for uploads.
///
/// Each allocation draws a fresh random v4 UUID, so concurrent callers never
/// need to coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetNameAllocator;

impl AssetNameAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Allocate names for an upload declared as `original_name`.
    ///
    /// `extension` is the lowercased declared extension that passed the
    /// allowlist.
    pub fn allocate(&self, original_name: &str, extension: &str) -> AllocatedNames {
        self.allocate_with_token(&Uuid::new_v4().to_string(), original_name, extension)
    }

    /// Same as [`allocate`](Self::allocate) with a caller-supplied token.
    pub fn allocate_with_token(
        &self,
        token: &str,
        original_name: &str,
        extension: &str,
    ) -> AllocatedNames {
        let sanitized = sanitize_filename(original_name, extension);

        let primary = if REENCODE_EXTENSIONS.contains(&extension) {
            let stem = sanitized
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(&sanitized);
            format!("{}_{}.{}", token, stem, JPEG_EXTENSION)
        } else {
            format!("{}_{}", token, sanitized)
        };

        let thumbnail = format!("{}{}", THUMBNAIL_NAME_PREFIX, primary);
        AllocatedNames { primary, thumbnail }
    }
}

/// Reduce an untrusted filename to a safe single path component.
///
/// The name is NFKD-normalized so accented letters keep their base letter.
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped and leading/trailing `.`/`_` are trimmed. The
/// result keeps a `.{extension}` suffix so the stored name still carries the
/// declared type.
pub fn sanitize_filename(filename: &str, extension: &str) -> String {
    let decomposed: String = filename.nfkd().collect();
    let spaced = decomposed.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let mut sanitized = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();

    let extension: String = extension
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    if sanitized.is_empty() {
        sanitized = PLACEHOLDER_STEM.to_string();
    }

    if !extension.is_empty() && declared_extension(&sanitized).as_deref() != Some(&extension) {
        sanitized = format!("{}.{}", sanitized, extension);
    }

    truncate_keeping_extension(sanitized, MAX_SANITIZED_LEN)
}

fn truncate_keeping_extension(name: String, max_len: usize) -> String {
    if name.len() <= max_len {
        return name;
    }

    // Only ASCII remains at this point, so byte offsets are char boundaries.
    match name.rsplit_once('.') {
        Some((stem, ext)) if ext.len() + 1 < max_len => {
            let keep = max_len - ext.len() - 1;
            format!("{}.{}", &stem[..keep.min(stem.len())], ext)
        }
        _ => name[..max_len].to_string(),
    }
}
