//! Chat session: selected document, question buffer, transcript and the
//! busy flag, plus the upload-then-ask submit cycle that drives them.
//!
//! A cycle is `begin_submit` → `Submission::upload` → `enter_asking` →
//! `Submission::ask` → `finish_submit`. [`ChatSession::submit`] runs the whole
//! thing inline; a UI that must keep drawing runs the two network steps on a
//! task and hands the [`Outcome`] back.

use crate::client::{ClientError, QaClient};
use crate::document::Document;

/// One question/answer pair of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

/// Where the session is in the submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Asking,
}

/// Why a submit cycle ended without a new turn. `Display` is the message
/// shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please upload a PDF file first.")]
    NoDocument,
    #[error("A question is already being processed. Please wait.")]
    Busy,
    #[error("Error uploading PDF. Please try again.")]
    Upload(#[source] ClientError),
    #[error("Error asking question: {detail}")]
    Ask {
        detail: String,
        #[source]
        source: ClientError,
    },
}

impl SubmitError {
    fn ask(source: ClientError) -> Self {
        SubmitError::Ask {
            detail: source.user_detail(),
            source,
        }
    }
}

/// Snapshot taken when a cycle starts. The turn appended on success uses this
/// question, not whatever the buffer holds by then.
#[derive(Debug, Clone)]
pub struct Submission {
    document: Document,
    question: String,
}

/// Result of the network half of a cycle, fed back into [`ChatSession::finish_submit`].
#[derive(Debug)]
pub struct Outcome {
    question: String,
    result: Result<String, SubmitError>,
}

impl Submission {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Step 1: upload the document.
    pub async fn upload(&self, client: &QaClient) -> Result<(), SubmitError> {
        client.upload(&self.document).await.map_err(|e| {
            tracing::warn!(name = self.document.name(), error = %e, "upload failed");
            SubmitError::Upload(e)
        })
    }

    /// Step 2: ask the question about the uploaded document.
    pub async fn ask(&self, client: &QaClient) -> Result<String, SubmitError> {
        client
            .ask(self.document.name(), &self.question)
            .await
            .map_err(|e| {
                tracing::warn!(name = self.document.name(), error = %e, "ask failed");
                SubmitError::ask(e)
            })
    }

    /// Package a network result for `finish_submit`.
    pub fn outcome(self, result: Result<String, SubmitError>) -> Outcome {
        Outcome {
            question: self.question,
            result,
        }
    }
}

/// State holder for one interactive session.
#[derive(Debug, Default)]
pub struct ChatSession {
    document: Option<Document>,
    question: String,
    transcript: Vec<Turn>,
    phase: Phase,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected document unconditionally.
    pub fn select_document(&mut self, document: Document) {
        tracing::debug!(name = document.name(), "document selected");
        self.document = Some(document);
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Replace the question buffer.
    pub fn edit_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Validate and enter `Uploading`. Nothing changes on error.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::Busy);
        }
        let document = self.document.clone().ok_or(SubmitError::NoDocument)?;
        self.phase = Phase::Uploading;
        Ok(Submission {
            document,
            question: self.question.clone(),
        })
    }

    /// Upload finished; the ask call is now outstanding.
    pub fn enter_asking(&mut self) {
        if self.phase == Phase::Uploading {
            self.phase = Phase::Asking;
        }
    }

    /// Leave the cycle. On success the turn is appended and the question
    /// buffer cleared; on failure both are left alone. Busy is always cleared.
    pub fn finish_submit(&mut self, outcome: Outcome) -> Result<&Turn, SubmitError> {
        self.phase = Phase::Idle;
        let answer = outcome.result?;
        self.transcript.push(Turn {
            question: outcome.question,
            answer,
        });
        self.question.clear();
        tracing::info!(turns = self.transcript.len(), "answer received");
        Ok(&self.transcript[self.transcript.len() - 1])
    }

    /// Run a full cycle inline against `client`.
    pub async fn submit(&mut self, client: &QaClient) -> Result<&Turn, SubmitError> {
        let submission = self.begin_submit()?;
        let result = match submission.upload(client).await {
            Ok(()) => {
                self.enter_asking();
                submission.ask(client).await
            }
            Err(e) => Err(e),
        };
        self.finish_submit(submission.outcome(result))
    }
}
