//! Application configuration.
//!
//! Read once at startup from `<config dir>/kanri/config.toml`. A missing
//! file is not an error — defaults apply, and `KANRI_BASE_URL` (or the
//! `--base-url` flag) overrides the store location either way.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const BASE_URL_ENV: &str = "KANRI_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Color overrides for the TUI theme (`[ui.colors]`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the remote store.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, then apply the env override.
    pub fn load() -> Result<Config, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Config::from_file(&path)?,
            _ => Config::default(),
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `<config dir>/kanri/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("kanri").join("config.toml"))
}

/// Directory for the TUI log file.
pub fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("kanri"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.timeout_secs, 10);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn test_from_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "base_url = \"https://store.example/api\"\n\
             timeout_secs = 3\n\
             [ui.colors]\n\
             background = \"#101010\"\n"
        )
        .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://store.example/api");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.ui.colors.get("background").unwrap(), "#101010");
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "base_url = [not a string").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
