//! Integration tests for config load/save with real files in a temp dir.

use pdf_qa_client::{config, Config, ConfigError};
use predicates::prelude::*;

#[test]
fn load_existing_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
server:
  base_url: "http://qa.example.com:8000"
  upload_path: "/v1/upload/"
  ask_path: "/v1/ask/"
"#,
    )
    .unwrap();

    let cfg = config::load(&config_path).expect("load should succeed");
    assert_eq!(cfg.server.base_url(), "http://qa.example.com:8000");
    assert_eq!(cfg.server.upload_path(), "/v1/upload/");
    assert_eq!(cfg.server.ask_path(), "/v1/ask/");
}

#[test]
fn save_creates_directory_and_file_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("pdf-qa");
    let config_path = config_dir.join("config.yaml");
    assert!(!config_dir.exists(), "config dir should not exist yet");

    let mut config = Config::default();
    config.server.base_url = Some("http://localhost:9000".into());

    config::save(&config_path, &config).expect("save should succeed");
    assert!(
        predicates::path::exists().eval(&config_path),
        "config file should exist after save"
    );
    let contents = std::fs::read_to_string(&config_path).unwrap();
    assert!(predicates::str::contains("server:").eval(&contents));
    assert!(predicates::str::contains("base_url").eval(&contents));
    // Unset keys are not written.
    assert!(predicates::str::contains("ask_path").not().eval(&contents));
}

#[test]
fn saved_config_loads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");

    let mut original = Config::default();
    original.server.base_url = Some("http://10.0.0.5:8000".into());
    original.server.ask_path = Some("/qa/ask/".into());

    config::save(&config_path, &original).expect("save should succeed");
    let reloaded = config::load(&config_path).expect("reload should succeed");
    assert_eq!(reloaded, original);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = config::load(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(predicate::str::contains("nope.yaml").eval(&err.to_string()));
}

#[test]
fn load_invalid_yaml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "server: [unclosed").unwrap();
    let err = config::load(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn resolve_with_explicit_path_requires_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert!(config::resolve(Some(&missing)).is_err());

    let present = dir.path().join("present.yaml");
    std::fs::write(&present, "server:\n  base_url: http://example:1\n").unwrap();
    let cfg = config::resolve(Some(&present)).unwrap();
    assert_eq!(cfg.server.base_url(), "http://example:1");
}

/// Config path resolves to `~/.pdf-qa/config.yaml` using the current platform's home dir.
#[test]
fn default_config_path_uses_home_directory() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap().to_string();

    let key = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let original = std::env::var(key).ok();

    std::env::set_var(key, &home);
    let path = config::default_config_path();
    match original {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }

    let path = path.expect("should resolve a config path");
    let expected = dir.path().join(".pdf-qa").join("config.yaml");
    assert_eq!(path, expected);
}
