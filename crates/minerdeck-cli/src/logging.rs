//! Tracing setup.
//!
//! stdout carries the host protocol, so logs go to stderr or to a rolling
//! file under `log_dir`.

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_ENV: &str = "MINERDECK_LOG";
const DEFAULT_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "minerdeck.log";

/// Picks the filter directive: CLI flag, then `MINERDECK_LOG`, then config.
fn filter_directive(cli_filter: Option<&str>, config: &Config) -> String {
    [
        cli_filter.map(str::to_string),
        std::env::var(LOG_ENV).ok(),
        config.log_level.clone(),
    ]
    .into_iter()
    .flatten()
    .find(|directive| !directive.trim().is_empty())
    .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file logs are flushed.
pub fn init(config: &Config, cli_filter: Option<&str>) -> Result<Option<WorkerGuard>> {
    let directive = filter_directive(cli_filter, config);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log dir {}", dir.display()))?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        builder
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|err| anyhow!("Failed to install logger: {err}"))?;
        Ok(Some(guard))
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!("Failed to install logger: {err}"))?;
        Ok(None)
    }
}
