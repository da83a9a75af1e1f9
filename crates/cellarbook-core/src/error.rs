//! Error types module
//!
//! [`IngestionError`] is the whole failure vocabulary of the ingestion
//! pipeline. Codec, filesystem and task-join failures are absorbed by the
//! pipeline and re-emitted as one of these variants carrying only a message,
//! so no implementation-specific error type crosses the crate boundary.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
///
/// The routing layer maps these onto its own responses and flash messages.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_TYPE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("No file provided")]
    NoFile,

    #[error("Unsupported file type: {}", extension.as_deref().unwrap_or("<none>"))]
    UnsupportedType { extension: Option<String> },

    #[error("Upload exceeds the maximum size of {max} bytes")]
    PayloadTooLarge { max: usize },

    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Failed to write {path}: {reason}")]
    WriteFailure { path: String, reason: String },
}

impl IngestionError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        IngestionError::DecodeFailure(err.to_string())
    }

    pub fn write(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        IngestionError::WriteFailure {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl ErrorMetadata for IngestionError {
    fn http_status_code(&self) -> u16 {
        match self {
            IngestionError::NoFile => 400,
            IngestionError::UnsupportedType { .. } => 415,
            IngestionError::PayloadTooLarge { .. } => 413,
            IngestionError::DecodeFailure(_) => 422,
            IngestionError::WriteFailure { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            IngestionError::NoFile => "NO_FILE",
            IngestionError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            IngestionError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            IngestionError::DecodeFailure(_) => "DECODE_FAILURE",
            IngestionError::WriteFailure { .. } => "WRITE_FAILURE",
        }
    }

    fn client_message(&self) -> String {
        match self {
            IngestionError::NoFile => "No image selected".to_string(),
            IngestionError::UnsupportedType { .. } => {
                "Unsupported image type. Please upload a PNG, JPEG or HEIC photo.".to_string()
            }
            IngestionError::PayloadTooLarge { max } => {
                format!("Image is too large (limit is {} MB)", max / (1024 * 1024))
            }
            IngestionError::DecodeFailure(_) | IngestionError::WriteFailure { .. } => {
                "Error processing image. Please try again.".to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            IngestionError::NoFile | IngestionError::UnsupportedType { .. } => LogLevel::Debug,
            IngestionError::PayloadTooLarge { .. } | IngestionError::DecodeFailure(_) => {
                LogLevel::Warn
            }
            IngestionError::WriteFailure { .. } => LogLevel::Error,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &str, reason: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(IngestionError::NoFile.error_code(), "NO_FILE");
        assert_eq!(
            IngestionError::UnsupportedType { extension: None }.error_code(),
            "UNSUPPORTED_TYPE"
        );
        assert_eq!(
            IngestionError::decode("bad header").error_code(),
            "DECODE_FAILURE"
        );
    }

    #[test]
    fn test_unsupported_type_display() {
        let err = IngestionError::UnsupportedType {
            extension: Some("txt".to_string()),
        };
        assert_eq!(err.to_string(), "Unsupported file type: txt");

        let err = IngestionError::UnsupportedType { extension: None };
        assert_eq!(err.to_string(), "Unsupported file type: <none>");
    }

    #[test]
    fn test_write_failure_hides_internals_from_client() {
        let err = IngestionError::write(std::path::Path::new("/srv/uploads/x.jpg"), "disk full");
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(!err.client_message().contains("/srv"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = IngestionError::PayloadTooLarge {
            max: 10 * 1024 * 1024,
        };
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("10 MB"));
    }
}
