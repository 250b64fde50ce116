//! Pool dashboard client.
//!
//! One GET per refresh. The HTTP status is not checked: pools answer
//! unknown miners with a JSON error body, which decodes like any other
//! response and is filtered by its `status` field downstream.

use anyhow::{Context, Result};

use crate::settings::PoolTarget;

mod errors;
mod types;

pub use errors::{PoolError, PoolErrorKind};
pub use types::{CurrentStatistics, DashboardData, DashboardResponse, STATUS_OK};

#[derive(Debug, Clone, Default)]
pub struct PoolClient {
    http: reqwest::Client,
}

impl PoolClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build pool HTTP client")?;
        Ok(Self { http })
    }

    /// Fetches the miner dashboard for `target`.
    ///
    /// # Errors
    /// Returns a `Request` error if the connection fails and a `Decode`
    /// error if the body is not a JSON object.
    pub async fn fetch_dashboard(&self, target: &PoolTarget) -> Result<DashboardResponse, PoolError> {
        let url = dashboard_url(&target.pool_api_url, &target.miner_id);
        tracing::debug!(%url, "fetching pool dashboard");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| PoolError::request(&url, &err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| PoolError::request(&url, &err))?;
        tracing::debug!(%url, %status, bytes = body.len(), "pool dashboard response");

        serde_json::from_slice(&body).map_err(|err| PoolError::decode(&url, &err))
    }
}

/// Builds `{base}/miner/{id}/dashboard` with exactly one `/` after the base.
pub fn dashboard_url(pool_api_url: &str, miner_id: &str) -> String {
    format!(
        "{}/miner/{}/dashboard",
        pool_api_url.trim_end_matches('/'),
        strip_hex_prefix(miner_id)
    )
}

/// Drops a leading `0x`/`0X` from a wallet address.
pub fn strip_hex_prefix(miner_id: &str) -> &str {
    miner_id
        .strip_prefix("0x")
        .or_else(|| miner_id.strip_prefix("0X"))
        .unwrap_or(miner_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "ea674fdde714fd979de3edf0f56aa9716b898ec8";

    #[test]
    fn test_dashboard_url_single_separator() {
        for base in [
            "https://api.ethermine.org",
            "https://api.ethermine.org/",
            "https://api.ethermine.org//",
        ] {
            let url = dashboard_url(base, WALLET);
            assert_eq!(
                url,
                format!("https://api.ethermine.org/miner/{WALLET}/dashboard"),
                "base: {base}"
            );
        }
    }

    #[test]
    fn test_dashboard_url_keeps_base_path() {
        let url = dashboard_url("https://pool.example/api/v1/", WALLET);
        assert_eq!(
            url,
            format!("https://pool.example/api/v1/miner/{WALLET}/dashboard")
        );
    }

    #[test]
    fn test_dashboard_url_never_contains_hex_prefix() {
        for id in [WALLET.to_string(), format!("0x{WALLET}"), format!("0X{WALLET}")] {
            let url = dashboard_url("https://api.ethermine.org", &id);
            assert!(!url.contains("0x") && !url.contains("0X"), "url: {url}");
            assert!(url.contains(&format!("/miner/{WALLET}/")));
        }
    }

    #[test]
    fn test_strip_hex_prefix_only_leading() {
        assert_eq!(strip_hex_prefix("0xabc"), "abc");
        assert_eq!(strip_hex_prefix("abc"), "abc");
        assert_eq!(strip_hex_prefix(""), "");
        assert_eq!(strip_hex_prefix("0x"), "");
    }
}
