//! pdf-qa-tui: interactive terminal client for PDF Q&A.

use clap::Parser;
use pdf_qa_client::{config, QaClient};
use pdf_qa_tui::App;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pdf-qa-tui", about = "Chat with a PDF document from the terminal")]
struct Cli {
    /// Config file (else $PDF_QA_CONFIG, else ~/.pdf-qa/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file.
    #[arg(long)]
    server: Option<String>,

    /// Document to select on startup.
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Write logs here. The terminal is taken by the UI, so nothing is
    /// logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: cannot open log file {}: {}", path.display(), e);
            process::exit(1);
        }
    }

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
    tracing::info!(base_url = cfg.server.base_url(), "starting");

    let mut app = App::new();
    if let Some(path) = &cli.file {
        app.pick_document(path);
    }

    let client = QaClient::from_config(&cfg);
    if let Err(e) = pdf_qa_tui::run(&mut app, client).await {
        eprintln!("Error: terminal failure: {}", e);
        process::exit(1);
    }
}
