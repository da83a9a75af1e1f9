use cellarbook_core::IngestSettings;

/// Upload validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename has no extension")]
    MissingExtension,

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// The offending extension, if the filename had one.
    pub fn extension(&self) -> Option<&str> {
        match self {
            ValidationError::MissingExtension => None,
            ValidationError::InvalidExtension { extension, .. } => Some(extension),
        }
    }
}

/// The text after the final `.` of `filename`, lowercased.
///
/// A leading dot counts, so `".png"` has extension `png`. A trailing dot
/// yields no extension.
pub fn declared_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
}

/// Upload validator
///
/// Checks the declared filename against the configured allowlist before any
/// bytes are read. The declared content type is never trusted; a mismatch is
/// only logged.
pub struct UploadValidator<'a> {
    settings: &'a IngestSettings,
}

impl<'a> UploadValidator<'a> {
    pub fn new(settings: &'a IngestSettings) -> Self {
        Self { settings }
    }

    /// Validate file extension, returning it lowercased.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = declared_extension(filename).ok_or(ValidationError::MissingExtension)?;

        if !self.settings.is_allowed_extension(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.settings.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Log when the declared Content-Type does not match the extension.
    ///
    /// Returns whether they matched; unknown extensions count as a match.
    pub fn check_content_type(&self, extension: &str, content_type: Option<&str>) -> bool {
        let Some(content_type) = content_type else {
            return true;
        };

        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let expected: &[&str] = match extension {
            "jpg" | "jpeg" => &["image/jpeg", "image/jpg", "image/pjpeg"],
            "png" => &["image/png"],
            "heic" => &["image/heic", "image/heic-sequence", "image/heif"],
            "heif" => &["image/heif", "image/heif-sequence", "image/heic"],
            _ => {
                tracing::debug!(
                    extension = %extension,
                    content_type = %content_type,
                    "Unknown extension, skipping Content-Type/extension cross-check"
                );
                return true;
            }
        };

        let matched = expected.iter().any(|ct| *ct == normalized);
        if !matched {
            tracing::debug!(
                extension = %extension,
                content_type = %content_type,
                "Declared Content-Type does not match extension; ignoring it"
            );
        }
        matched
    }
}
