//! File logging
//!
//! The TUI owns the terminal, so tracing output goes to
//! `<data_local_dir>/patchdeck/patchdeck.log` instead of stderr.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "PATCHDECK_LOG";

const DEFAULT_FILTER: &str = "patchdeck=info";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("patchdeck").join("patchdeck.log"))
}

/// Pick the filter directive: environment, then config, then the default.
pub fn filter_directive(config: &Config, env: Option<&str>) -> String {
    let non_blank = |f: &&str| !f.trim().is_empty();
    env.filter(non_blank)
        .or(config.log_filter.as_deref().filter(non_blank))
        .map(str::trim)
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// no data directory exists and logging stays off.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    let Some(path) = default_log_path() else {
        return Ok(None);
    };
    let env = std::env::var(LOG_ENV).ok();
    init_at(&path, &filter_directive(config, env.as_deref()))?;
    Ok(Some(path))
}

fn init_at(path: &Path, directive: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(directive)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        let config = Config {
            log_filter: Some("patchdeck=debug".to_string()),
            ..Config::default()
        };
        assert_eq!(filter_directive(&config, Some("trace")), "trace");
        assert_eq!(filter_directive(&config, None), "patchdeck=debug");
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        let config = Config {
            log_filter: Some("  ".to_string()),
            ..Config::default()
        };
        assert_eq!(filter_directive(&config, None), DEFAULT_FILTER);
        assert_eq!(filter_directive(&Config::default(), Some("")), DEFAULT_FILTER);
    }
}
