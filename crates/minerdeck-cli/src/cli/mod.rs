//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "minerdeck")]
#[command(version)]
#[command(about = "Mining pool status tile for macro-pad hosts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: $MINERDECK_HOME/config.toml)
    #[arg(long, env = "MINERDECK_CONFIG", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "minerdeck_core=trace"
    #[arg(long, value_name = "FILTER", global = true)]
    log_level: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Read host events from stdin, write tile commands to stdout (default)
    Run,
    /// Fetch a miner dashboard once and save the rendered tile as PNG
    Render {
        /// Wallet address, with or without 0x
        #[arg(long)]
        miner_id: String,

        /// Pool API base URL, e.g. https://api.ethermine.org
        #[arg(long)]
        pool_api_url: String,

        /// Output PNG path
        #[arg(short, long, default_value = "tile.png")]
        output: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::paths::config_path);

    let command = cli.command.unwrap_or(Commands::Run);
    if let Commands::Config { command } = command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path(&config_path);
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(&config_path),
        };
    }

    let config = config::Config::load_from(&config_path).context("load config")?;
    let _log_guard = logging::init(&config, cli.log_level.as_deref())?;
    tracing::debug!(config = %config_path.display(), "config loaded");

    // Single-threaded: the tile runtime is the only owner of tile state.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create tokio runtime")?;

    let result = rt.block_on(async move {
        match command {
            Commands::Run => commands::run::run(&config).await,
            Commands::Render {
                miner_id,
                pool_api_url,
                output,
            } => commands::render::run(&config, &miner_id, &pool_api_url, &output).await,
            Commands::Config { .. } => Ok(()),
        }
    });

    // stdin is read on a blocking thread that may still be parked on a read.
    rt.shutdown_background();
    result
}
