//! pdf-qa: one-shot CLI for PDF Q&A.
//! Uploads a document, asks one question (argument or first stdin line) and
//! prints the resulting turn to stdout.

use clap::Parser;
use pdf_qa_client::{config, ChatSession, Document, QaClient};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pdf-qa", about = "Ask a question about a PDF document")]
struct Cli {
    /// Config file (else $PDF_QA_CONFIG, else ~/.pdf-qa/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file.
    #[arg(long)]
    server: Option<String>,

    /// Document to upload.
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Question to ask; read from stdin when omitted.
    question: Option<String>,
}

fn read_question_from_stdin() -> String {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).unwrap_or(0);
    line.trim().to_string()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = match config::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: failed to load config: {}", e);
            process::exit(1);
        }
    };
    if let Some(server) = cli.server {
        cfg.server.base_url = Some(server);
    }

    let mut session = ChatSession::new();
    if let Some(path) = &cli.file {
        match Document::open(path) {
            Ok(doc) => session.select_document(doc),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }

    let question = cli.question.unwrap_or_else(read_question_from_stdin);
    session.edit_question(question);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    let client = QaClient::from_config(&cfg);
    rt.block_on(async {
        match session.submit(&client).await {
            Ok(turn) => {
                println!("Q: {}", turn.question);
                println!("A: {}", turn.answer);
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    });
}
