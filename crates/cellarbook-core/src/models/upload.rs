//! Upload candidate handed over by the boundary layer.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::pin::Pin;

use bytes::Bytes;
use tokio::io::AsyncRead;

/// Readable body of an upload.
pub type UploadStream = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// An uploaded file: a byte stream plus the client-declared filename and
/// optional content type. Consumed entirely by one ingestion call.
pub struct UploadCandidate {
    filename: String,
    content_type: Option<String>,
    body: UploadStream,
}

impl UploadCandidate {
    pub fn new(filename: impl Into<String>, body: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            body: Box::pin(body),
        }
    }

    /// Candidate whose body is already fully buffered (e.g. a multipart field).
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(filename, Cursor::new(data.into()))
    }

    /// Candidate reading from a local file, named after the file's base name.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, file))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn into_body(self) -> UploadStream {
        self.body
    }
}

impl fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
