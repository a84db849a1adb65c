//! Configuration management for patchdeck
//!
//! Stores settings in ~/.config/patchdeck/config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backend address used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Environment variable overriding the configured backend address
pub const SERVER_ENV: &str = "PATCHDECK_SERVER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the improvement backend
    pub server_url: String,
    /// Optional per-request timeout. Unset means requests may wait forever.
    pub request_timeout_secs: Option<u64>,
    /// Pre-filled repository path for the submission form
    pub default_repo_path: Option<String>,
    /// tracing filter directive, e.g. "patchdeck=debug"
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: None,
            default_repo_path: None,
            log_filter: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("patchdeck"))
    }

    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`. A missing file yields defaults; a corrupt
    /// one is set aside and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                preserve_corrupt_config(path, &content);
                eprintln!(
                    "  Warning: Config file was corrupted ({}). A backup was saved and defaults were loaded.",
                    err
                );
                Self::default()
            }
        }
    }

    /// Resolve the backend address: CLI flag, then environment, then file.
    pub fn resolve_server_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        cli.or(env)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.server_url)
            .to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

fn preserve_corrupt_config(path: &Path, content: &str) {
    let backup = path.with_extension("toml.corrupt");
    if let Err(e) = fs::write(&backup, content) {
        eprintln!("  Warning: Failed to back up corrupt config: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 30\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn corrupt_file_is_backed_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = [not toml").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.toml.corrupt").exists());
    }

    #[test]
    fn server_url_precedence() {
        let config = Config {
            server_url: "http://file:1".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_server_url(Some("http://cli:1"), Some("http://env:1")),
            "http://cli:1"
        );
        assert_eq!(
            config.resolve_server_url(None, Some("http://env:1")),
            "http://env:1"
        );
        assert_eq!(config.resolve_server_url(None, Some("  ")), "http://file:1");
        assert_eq!(config.resolve_server_url(None, None), "http://file:1");
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(config.request_timeout().is_none());
    }
}
