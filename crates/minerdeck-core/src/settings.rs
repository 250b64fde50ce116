//! Per-tile settings as persisted by the host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings stored by the host for one tile.
///
/// Keys are round-tripped verbatim: `minerId` and `poolApiUrl` are the only
/// ones read here, anything else the settings UI writes is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_api_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TileSettings {
    pub fn new(miner_id: impl Into<String>, pool_api_url: impl Into<String>) -> Self {
        Self {
            miner_id: Some(miner_id.into()),
            pool_api_url: Some(pool_api_url.into()),
            extra: Map::new(),
        }
    }

    /// Returns the fetch target, or `None` when either field is missing or blank.
    pub fn target(&self) -> Option<PoolTarget> {
        let miner_id = non_blank(self.miner_id.as_deref())?;
        let pool_api_url = non_blank(self.pool_api_url.as_deref())?;
        Some(PoolTarget {
            miner_id: miner_id.to_string(),
            pool_api_url: pool_api_url.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// A fully configured miner lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolTarget {
    pub miner_id: String,
    pub pool_api_url: String,
}
