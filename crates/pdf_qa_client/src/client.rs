//! HTTP client for the two backend calls: multipart upload, then JSON ask.

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::config::Config;
use crate::document::Document;
use crate::messages::{AskRequest, AskResponse, ErrorBody, UploadReceipt, UPLOAD_FIELD};

/// Client for one backend. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct QaClient {
    http: reqwest::Client,
    upload_url: String,
    ask_url: String,
}

/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Text shown to the user for a failed ask call.
    pub fn user_detail(&self) -> String {
        match self {
            ClientError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

impl QaClient {
    /// Client with the default endpoint paths under `base_url`
    /// (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&Config {
            server: crate::config::ServerSection {
                base_url: Some(base_url.to_string()),
                ..Default::default()
            },
        })
    }

    pub fn from_config(config: &Config) -> Self {
        let server = &config.server;
        Self {
            http: reqwest::Client::new(),
            upload_url: join_url(server.base_url(), server.upload_path()),
            ask_url: join_url(server.base_url(), server.ask_path()),
        }
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn ask_url(&self) -> &str {
        &self.ask_url
    }

    /// Send the document as the `file` field of a multipart form.
    /// Any 2xx is success; the body is only logged.
    pub async fn upload(&self, document: &Document) -> Result<(), ClientError> {
        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.name().to_string())
            .mime_str(document.mime_type())?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(url = %self.upload_url, name = document.name(), size = document.len(), "uploading document");
        let response = self.http.post(&self.upload_url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                detail: ErrorBody::detail_from(&body),
            });
        }

        let receipt = UploadReceipt::from_body(&body);
        tracing::debug!(
            filename = ?receipt.filename,
            document_id = ?receipt.document_id,
            "upload accepted"
        );
        Ok(())
    }

    /// Ask `question` about the previously uploaded `filename`.
    pub async fn ask(&self, filename: &str, question: &str) -> Result<String, ClientError> {
        let request = AskRequest::new(filename, question);
        tracing::debug!(url = %self.ask_url, filename, "asking question");
        let response = self.http.post(&self.ask_url).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                detail: ErrorBody::detail_from(&body),
            });
        }
        let parsed: AskResponse = serde_json::from_slice(&body)?;
        Ok(parsed.answer)
    }
}
