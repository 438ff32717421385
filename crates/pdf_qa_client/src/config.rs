//! Client config load/save for `~/.pdf-qa/config.yaml`.

use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload/";
pub const DEFAULT_ASK_PATH: &str = "/ask/";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PDF_QA_CONFIG";

/// Backend location and endpoint paths.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ServerSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_path: Option<String>,
}

impl ServerSection {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn upload_path(&self) -> &str {
        self.upload_path.as_deref().unwrap_or(DEFAULT_UPLOAD_PATH)
    }

    pub fn ask_path(&self) -> &str {
        self.ask_path.as_deref().unwrap_or(DEFAULT_ASK_PATH)
    }
}

/// Full client config.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
}

/// Returns the default config file path: `~/.pdf-qa/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".pdf-qa").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let contents = serde_yaml::to_string(config).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, contents).map_err(io_err)
}

/// Resolve and load the config the binaries run with.
///
/// An explicit path (flag or `PDF_QA_CONFIG`) must exist. The default path is
/// optional: when it is missing, defaults are used.
pub fn resolve(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load(path);
    }
    if let Some(val) = std::env::var_os(CONFIG_ENV_VAR) {
        return load(Path::new(&val));
    }
    match default_config_path() {
        Some(path) if path.exists() => load(&path),
        _ => {
            tracing::debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Config load/save error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("server:\n  base_url: http://qa.local:9000\n").unwrap();
        assert_eq!(cfg.server.base_url(), "http://qa.local:9000");
        assert_eq!(cfg.server.upload_path(), DEFAULT_UPLOAD_PATH);
        assert_eq!(cfg.server.ask_path(), DEFAULT_ASK_PATH);
    }

    #[test]
    fn empty_document_is_default_config() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.server.base_url(), DEFAULT_BASE_URL);
    }
}
