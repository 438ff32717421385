//! The document a question is asked about: file name plus raw bytes.

use std::path::{Path, PathBuf};

/// A selected document. No type or size validation happens here; whatever
/// the user picks is sent as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk, naming it after the path's file name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DocumentError::NoFileName {
                path: path.to_path_buf(),
            })?
            .to_string();
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(name = %name, size = bytes.len(), "document loaded");
        Ok(Self { name, bytes })
    }

    /// File name used for the upload and as the key of the ask call.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type announced in the multipart part.
    pub fn mime_type(&self) -> &'static str {
        let is_pdf = Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            "application/pdf"
        } else {
            "application/octet-stream"
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not name a file", path.display())]
    NoFileName { path: PathBuf },
}
