//! CLI command handlers.

pub mod config;
pub mod render;
pub mod run;

use anyhow::Result;
use minerdeck_core::pool::PoolClient;

use crate::config::Config;

fn pool_client(config: &Config) -> Result<PoolClient> {
    PoolClient::with_user_agent(config.user_agent())
}
