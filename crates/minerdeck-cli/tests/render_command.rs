//! Tests for `minerdeck render`.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{DASHBOARD_OK, MINER_ID, can_bind_localhost, dashboard_path, json_response};
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

#[tokio::test(flavor = "multi_thread")]
async fn test_render_writes_png_and_summary() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(dashboard_path()))
        .respond_with(json_response(DASHBOARD_OK))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("tile.png");
    cargo_bin_cmd!("minerdeck")
        .env("MINERDECK_HOME", dir.path())
        .env_remove("MINERDECK_CONFIG")
        .args(["render", "--miner-id", &format!("0x{MINER_ID}")])
        .args(["--pool-api-url", &mock_server.uri()])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("123.46 MH/s"))
        .stdout(predicate::str::contains("2.5000 ETH"))
        .stdout(predicate::str::contains("3/5"));

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(PNG_SIGNATURE));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_render_reports_pool_error_status() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(json_response(r#"{"status":"ERROR","error":"Invalid address"}"#))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("tile.png");
    cargo_bin_cmd!("minerdeck")
        .env("MINERDECK_HOME", dir.path())
        .env_remove("MINERDECK_CONFIG")
        .args(["render", "--miner-id", MINER_ID])
        .args(["--pool-api-url", &mock_server.uri()])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pool returned status ERROR"));

    assert!(!output.exists());
}

#[test]
fn test_render_rejects_blank_miner_id() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("minerdeck")
        .env("MINERDECK_HOME", dir.path())
        .env_remove("MINERDECK_CONFIG")
        .args(["render", "--miner-id", " ", "--pool-api-url", "https://api.ethermine.org"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing minerId or poolApiUrl"));
}

#[test]
fn test_render_rejects_non_http_url() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("minerdeck")
        .env("MINERDECK_HOME", dir.path())
        .env_remove("MINERDECK_CONFIG")
        .args(["render", "--miner-id", MINER_ID, "--pool-api-url", "ftp://pool.example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported pool API URL scheme"));
}
