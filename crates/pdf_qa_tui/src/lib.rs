//! Terminal front-end for PDF Q&A: document picker, transcript, question
//! input and loading indicator over a [`pdf_qa_client::ChatSession`].

pub mod app;
pub mod input;
pub mod runner;
pub mod terminal;
pub mod ui;

pub use app::{App, CycleEvent, Mode};
pub use input::{handle_key, InputAction};
pub use runner::{drive_submission, run};
