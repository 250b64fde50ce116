use serde::Deserialize;
use serde_json::Value;

/// Status value the pool uses for a successful lookup.
pub const STATUS_OK: &str = "OK";

/// Raw `miner/{id}/dashboard` response.
///
/// Only the envelope is decoded eagerly. `data` stays untyped until the
/// normalizer runs, so an error body like `{"status":"ERROR","error":"..."}`
/// still decodes and is rejected by status instead of by shape.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl DashboardResponse {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub current_statistics: CurrentStatistics,
    pub workers: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStatistics {
    /// Hashes per second.
    pub current_hashrate: f64,
    /// Smallest token unit (18 decimals).
    pub unpaid: f64,
    pub active_workers: u64,
}
