//! One-shot render: fetch a dashboard and save the tile image.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use minerdeck_core::render::{RenderSurface, stats_frame};
use minerdeck_core::stats::StatsSnapshot;
use minerdeck_core::{PoolTarget, RefreshError, TileSettings};

use crate::config::Config;

pub async fn run(config: &Config, miner_id: &str, pool_api_url: &str, output: &Path) -> Result<()> {
    let target = TileSettings::new(miner_id, pool_api_url)
        .target()
        .ok_or_else(|| anyhow!(RefreshError::MissingConfiguration))?;
    validate_base_url(&target)?;

    let client = super::pool_client(config)?;
    let response = client
        .fetch_dashboard(&target)
        .await
        .map_err(RefreshError::from)?;
    if !response.is_ok() {
        bail!(RefreshError::UpstreamNonSuccess {
            status: response.status,
        });
    }
    let snapshot = StatsSnapshot::from_dashboard(&response).map_err(RefreshError::from)?;
    let stats = snapshot.formatted();

    let mut surface = RenderSurface::new();
    stats_frame(&stats).draw(&mut surface);
    let png = surface
        .encode_png()
        .map_err(|err| anyhow!(RefreshError::Render(err)))?;
    std::fs::write(output, png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(output = %output.display(), "tile rendered");
    println!("Hashrate: {}", stats.hashrate);
    println!("Unpaid:   {}", stats.unpaid);
    println!("Workers:  {}", stats.workers);
    println!("Wrote {}", output.display());
    Ok(())
}

fn validate_base_url(target: &PoolTarget) -> Result<()> {
    let url = url::Url::parse(&target.pool_api_url)
        .with_context(|| format!("Invalid pool API URL '{}'", target.pool_api_url))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("Unsupported pool API URL scheme '{other}'"),
    }
}
