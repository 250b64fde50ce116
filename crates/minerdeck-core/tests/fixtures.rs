//! Pool response fixtures for integration tests.

#![allow(dead_code)]

use minerdeck_core::render::{Frame, RenderSurface, loading_frame, stats_frame};
use minerdeck_core::stats::FormattedStats;
use serde_json::{Value, json};
use wiremock::ResponseTemplate;

/// Captured `miner/{id}/dashboard` body: 123456789 H/s, 2.5 ETH unpaid, 3 of 5 workers active.
pub const DASHBOARD_OK: &str = include_str!("fixtures/dashboard_ok.json");

pub const MINER_ID: &str = "ea674fdde714fd979de3edf0f56aa9716b898ec8";

pub fn dashboard_path() -> String {
    format!("/miner/{MINER_ID}/dashboard")
}

/// Minimal dashboard body with the given raw values.
pub fn dashboard_json(hashrate: u64, unpaid: u64, active_workers: u64, total_workers: usize) -> Value {
    let workers = vec![json!({}); total_workers];
    json!({
        "status": "OK",
        "data": {
            "currentStatistics": {
                "currentHashrate": hashrate,
                "unpaid": unpaid,
                "activeWorkers": active_workers
            },
            "workers": workers
        }
    })
}

pub fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/json")
        .set_body_string(body.to_string())
}

pub fn fixture_stats() -> FormattedStats {
    FormattedStats {
        hashrate: "123.46 MH/s".to_string(),
        unpaid: "2.5000 ETH".to_string(),
        workers: "3/5".to_string(),
    }
}

/// Data URI the tile should deliver for `frame`.
pub fn image_for(frame: &Frame) -> String {
    let mut surface = RenderSurface::new();
    frame.draw(&mut surface);
    surface.to_data_uri().unwrap()
}

pub fn loading_image() -> String {
    image_for(&loading_frame())
}

pub fn stats_image(stats: &FormattedStats) -> String {
    image_for(&stats_frame(stats))
}

pub fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_parses_as_dashboard() {
        let value: Value = serde_json::from_str(DASHBOARD_OK).unwrap();
        assert_eq!(value["status"], "OK");
        assert_eq!(value["data"]["workers"].as_array().unwrap().len(), 5);
        assert_eq!(value["data"]["currentStatistics"]["activeWorkers"], 3);
    }

    #[test]
    fn test_dashboard_json_worker_count() {
        let value = dashboard_json(1, 2, 1, 4);
        assert_eq!(value["data"]["workers"].as_array().unwrap().len(), 4);
    }
}
