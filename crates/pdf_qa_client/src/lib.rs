//! Shared PDF Q&A client library (config, HTTP protocol, chat session).
//! Used by the `pdf-qa` CLI and the terminal front-end.

pub mod client;
pub mod config;
pub mod document;
pub mod messages;
pub mod session;

pub use client::{ClientError, QaClient};
pub use config::{default_config_path, Config, ConfigError, ServerSection};
pub use document::{Document, DocumentError};
pub use session::{ChatSession, Outcome, Phase, SubmitError, Submission, Turn};
