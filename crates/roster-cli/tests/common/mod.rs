#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with an isolated HOME and cache directory.
///
/// Remote endpoints are pointed at `api_url`, which should be a local mock
/// server or an address nothing listens on.
pub fn run_cli(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roster"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("ROSTER_CACHE_DIR", home.join("cache"));
    cmd.env("ROSTER_USER_API", api_url);
    cmd.env("ROSTER_WEATHER_API", api_url);
    cmd.env("ROSTER_WEATHER_KEY", "test-key");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli(args, home, api_url);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Run the CLI with `input` on stdin, returning stdout.
pub fn run_cli_with_stdin(args: &[&str], home: &Path, api_url: &str, input: &str) -> String {
    use std::io::Write;
    use std::process::Stdio;

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roster"));
    cmd.args(args)
        .env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("ROSTER_CACHE_DIR", home.join("cache"))
        .env("ROSTER_USER_API", api_url)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A randomuser.me-shaped record.
pub fn api_user(uuid: &str, first: &str, last: &str) -> serde_json::Value {
    serde_json::json!({
        "gender": "female",
        "name": {"title": "Ms", "first": first, "last": last},
        "location": {
            "city": "Lyon",
            "state": "Rhône",
            "country": "France",
            "postcode": 69001,
            "coordinates": {"latitude": "45.7640", "longitude": "4.8357"}
        },
        "email": format!("{}@example.com", first.to_lowercase()),
        "login": {"uuid": uuid},
        "dob": {"date": "1990-04-01T12:00:00.000Z", "age": 34},
        "phone": "04-12-34-56-78",
        "cell": "06-12-34-56-78",
        "picture": {
            "large": "https://randomuser.me/api/portraits/women/1.jpg",
            "medium": "https://randomuser.me/api/portraits/med/women/1.jpg",
            "thumbnail": "https://randomuser.me/api/portraits/thumb/women/1.jpg"
        }
    })
}

/// `count` records with ids `user-000`, `user-001`, ...
pub fn api_users(count: usize) -> serde_json::Value {
    let results: Vec<_> = (0..count)
        .map(|i| api_user(&format!("user-{:03}", i), &format!("Person{}", i), "Example"))
        .collect();
    serde_json::json!({ "results": results })
}
