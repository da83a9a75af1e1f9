use cellarbook_core::{ErrorMetadata, IngestionError};
use serde::Serialize;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cellarbook=info";

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays parseable.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Machine-readable rendering of an ingestion failure.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: &'static str,
    pub status: u16,
    pub message: String,
    pub detail: String,
}

impl From<&IngestionError> for ErrorReport {
    fn from(err: &IngestionError) -> Self {
        Self {
            error: err.error_code(),
            status: err.http_status_code(),
            message: err.client_message(),
            detail: err.to_string(),
        }
    }
}
