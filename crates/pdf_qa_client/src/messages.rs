//! HTTP message bodies exchanged with the Q&A backend.

use serde::{Deserialize, Serialize};

/// Name of the multipart form field carrying the document.
pub const UPLOAD_FIELD: &str = "file";

/// Client → server: body of `POST /ask/`.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub filename: &'a str,
    pub question: &'a str,
}

impl<'a> AskRequest<'a> {
    pub fn new(filename: &'a str, question: &'a str) -> Self {
        Self { filename, question }
    }
}

/// Server → client: successful answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    /// Echo of the question; some backends send it, nothing relies on it.
    #[serde(default)]
    pub question: Option<String>,
}

/// Server → client: upload acknowledgement. Every field is optional because
/// the body is informational only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
}

impl UploadReceipt {
    /// Parse leniently; anything unreadable is an empty receipt.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Server → client: failure body. `error` is the documented field; `detail`
/// is what FastAPI-style backends send for `HTTPException`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extract the human-readable detail from a failure body, if there is one.
    pub fn detail_from(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        if let Some(error) = parsed.error {
            return Some(error);
        }
        match parsed.detail? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
