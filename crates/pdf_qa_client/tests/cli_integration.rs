//! Integration tests for the pdf-qa binary. Runs the real binary against a
//! real temp config, a real document on disk and an in-process HTTP server.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write a minimal YAML config pointing at `base_url`.
fn write_config(dir: &tempfile::TempDir, base_url: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, format!("server:\n  base_url: \"{}\"\n", base_url)).unwrap();
    path
}

fn write_document(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.4 test").unwrap();
    path
}

async fn answering_server(answer: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": answer })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_prints_question_and_answer() {
    let server = answering_server("This report covers Q1 results.").await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &server.uri());
    let doc = write_document(&dir);

    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--file")
        .arg(&doc)
        .arg("What is the summary?");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Q: What is the summary?"))
        .stdout(predicate::str::contains("A: This report covers Q1 results."));
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_reads_question_from_stdin_with_env_config() {
    let server = answering_server("Stdin answer.").await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &server.uri());
    let doc = write_document(&dir);

    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.env("PDF_QA_CONFIG", &config_path)
        .arg("--file")
        .arg(&doc)
        .write_stdin("Who is the author?\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Q: Who is the author?"))
        .stdout(predicate::str::contains("A: Stdin answer."));
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_server_flag_overrides_config() {
    let server = answering_server("From override.").await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, "http://127.0.0.1:9");
    let doc = write_document(&dir);

    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--server")
        .arg(server.uri())
        .arg("--file")
        .arg(&doc)
        .arg("q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A: From override."));
}

#[test]
fn cli_without_document_shows_validation_message() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, "http://127.0.0.1:9");

    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.arg("--config").arg(&config_path).arg("What is the summary?");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Please upload a PDF file first."));
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_upload_failure_shows_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &server.uri());
    let doc = write_document(&dir);

    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--file")
        .arg(&doc)
        .arg("What is the summary?");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error uploading PDF. Please try again."));
}

#[test]
fn cli_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .arg("q");

    cmd.assert()
        .failure()
        .stderr(predicate::str::is_match("(?i)(config|error)").unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_config_flag_wins_over_env_config() {
    let server = answering_server("From flag config.").await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &server.uri());
    let doc = write_document(&dir);

    let mut cmd = Command::from(cargo_bin_cmd!("pdf-qa"));
    cmd.env("PDF_QA_CONFIG", dir.path().join("absent.yaml"))
        .arg("--config")
        .arg(&config_path)
        .arg("--file")
        .arg(&doc)
        .arg("q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A: From flag config."));
}
