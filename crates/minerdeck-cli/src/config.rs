//! Plugin configuration.
//!
//! Loaded from `${MINERDECK_HOME}/config.toml` (or `--config`) with defaults
//! for every field. Per-tile settings (miner id, pool URL) live with the host,
//! not here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = concat!("minerdeck/", env!("CARGO_PKG_VERSION"));

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# minerdeck plugin configuration

# Log filter, e.g. "info" or "minerdeck_core=debug". MINERDECK_LOG and
# --log-level take precedence.
# log_level = "info"

# Write daily rolling log files here instead of stderr.
# log_dir = "/tmp/minerdeck-logs"

# User-Agent sent to the pool API.
# user_agent = "minerdeck"
"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter directive.
    pub log_level: Option<String>,
    /// Directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
    /// User-Agent for pool requests.
    pub user_agent: Option<String>,
}

impl Config {
    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|agent| !agent.is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

pub mod paths {
    //! MINERDECK_HOME resolution order:
    //! 1. MINERDECK_HOME environment variable (if set)
    //! 2. $HOME/.config/minerdeck
    //! 3. current directory

    use std::path::PathBuf;

    pub fn minerdeck_home() -> PathBuf {
        if let Some(home) = std::env::var_os("MINERDECK_HOME") {
            return PathBuf::from(home);
        }
        std::env::var_os("HOME").map_or_else(
            || PathBuf::from("."),
            |home| PathBuf::from(home).join(".config").join("minerdeck"),
        )
    }

    pub fn config_path() -> PathBuf {
        minerdeck_home().join("config.toml")
    }
}
