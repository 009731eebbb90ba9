//! CLI integration tests for the `weather` commands against a mock weather API.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli_failure, run_cli_success};

const UNREACHABLE: &str = "http://127.0.0.1:9";

async fn mock_weather_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 24.6},
            "name": "Lyon"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Lyon"}])))
        .mount(&server)
        .await;
    server
}

fn server_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}", server.address().port())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_fresh_weather() {
    let server = mock_weather_api().await;
    let home = TempDir::new().unwrap();

    let stdout = run_cli_success(
        &["weather", "show", "--lat", "45.76", "--lon", "4.84"],
        home.path(),
        &server_url(&server),
    );

    assert!(stdout.contains("Listing App  ☀ 24°C clear sky (Lyon)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cached_after_show() {
    let server = mock_weather_api().await;
    let home = TempDir::new().unwrap();
    run_cli_success(
        &["weather", "show", "--lat", "45.76", "--lon", "4.84"],
        home.path(),
        &server_url(&server),
    );

    let stdout = run_cli_success(&["weather", "cached", "--json"], home.path(), UNREACHABLE);

    let header: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(header["title"], "Listing App");
    assert_eq!(header["back"], false);
    assert_eq!(header["weather"]["city_name"], "Lyon");
    assert_eq!(header["weather"]["temperature_celsius"], 24);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_falls_back_to_cached() {
    let server = mock_weather_api().await;
    let home = TempDir::new().unwrap();
    run_cli_success(
        &["weather", "show", "--lat", "45.76", "--lon", "4.84"],
        home.path(),
        &server_url(&server),
    );

    let stdout = run_cli_success(
        &["weather", "show", "--lat", "-33.86", "--lon", "151.21"],
        home.path(),
        UNREACHABLE,
    );

    assert!(stdout.contains("24°C clear sky (Lyon)"));
}

#[test]
fn test_show_without_anything_is_title_only() {
    let home = TempDir::new().unwrap();

    let stdout = run_cli_success(
        &["weather", "show", "--lat", "45.76", "--lon", "4.84", "--json"],
        home.path(),
        UNREACHABLE,
    );

    let header: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(header["title"], "Listing App");
    assert!(header["weather"].is_null());
}

#[test]
fn test_cached_empty() {
    let home = TempDir::new().unwrap();

    let stdout = run_cli_success(&["weather", "cached"], home.path(), UNREACHABLE);

    assert_eq!(stdout.trim(), "Listing App");
}

#[test]
fn test_show_rejects_bad_coordinates() {
    let home = TempDir::new().unwrap();

    let stderr = run_cli_failure(
        &["weather", "show", "--lat", "123", "--lon", "4.84"],
        home.path(),
        UNREACHABLE,
    );

    assert!(stderr.contains("Invalid coordinates"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_without_location_uses_cached() {
    let server = mock_weather_api().await;
    let home = TempDir::new().unwrap();
    run_cli_success(
        &["weather", "show", "--lat", "45.76", "--lon", "4.84"],
        home.path(),
        &server_url(&server),
    );

    let output = common::run_cli(&["weather", "show"], home.path(), UNREACHABLE);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("24°C clear sky (Lyon)"));
    assert!(stderr.contains("No location granted"));
}

#[test]
fn test_show_requires_both_coordinates() {
    let home = TempDir::new().unwrap();

    let stderr = run_cli_failure(&["weather", "show", "--lat", "45.76"], home.path(), UNREACHABLE);

    assert!(stderr.contains("--lon"));
}
