//! Command-line smoke tests. None of these reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the caller's environment and config files
fn sitetrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sitetrack").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SITETRACK_API_URL")
        .env_remove("SITETRACK_ENV")
        .env_remove("SITETRACK_TIMEOUT_SECS")
        .env_remove("SITETRACK_PASSWORD")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// Workspace with a config that keeps the token file inside it
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let token = dir.path().join("token");
    fs::write(
        dir.path().join("sitetrack.toml"),
        format!(
            "[api]\nbase_url = \"http://127.0.0.1:9\"\n\n[session]\ncredentials_path = {:?}\n",
            token.to_string_lossy()
        ),
    )
    .unwrap();
    dir
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sites"))
        .stdout(predicate::str::contains("wkt"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn wkt_decode_prints_coordinates() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .args(["wkt", "decode", "POLYGON((0 0, 1 1, 1 0, 0 0))"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0 0\n1 1\n1 0\n0 0\n"))
        .stdout(predicate::str::contains("closed"));
}

#[test]
fn wkt_decode_json() {
    let dir = TempDir::new().unwrap();
    let output = sitetrack(&dir)
        .args(["--format", "json", "wkt", "decode", "polygon (( 1.5 2.5,3 4 ))"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["coordinates"], serde_json::json!([[1.5, 2.5], [3.0, 4.0]]));
    assert_eq!(report["closed"], serde_json::json!(false));
}

#[test]
fn wkt_decode_rejects_non_polygon() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .args(["wkt", "decode", "not a polygon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn wkt_decode_rejects_bad_coordinate() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .args(["wkt", "decode", "POLYGON((0 0, x y))"])
        .assert()
        .code(2);
}

#[test]
fn wkt_encode_appends_first_vertex() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .args(["wkt", "encode", "1.5 2.5, 3 4, 1.5 2.5"])
        .assert()
        .success()
        .stdout("POLYGON((1.5 2.5, 3 4, 1.5 2.5, 1.5 2.5))\n");
}

#[test]
fn wkt_encode_geojson() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .args(["wkt", "encode", "--format", "geojson", "0 0, 1 0, 1 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Polygon\""));
}

#[test]
fn draw_dry_run_stages_without_network() {
    let dir = workspace();
    sitetrack(&dir)
        .args(["sites", "draw", "--coords", "0 0, 1 0, 1 1", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("POLYGON((0 0, 1 0, 1 1, 0 0))"))
        .stdout(predicate::str::contains("Perimeter"));
}

#[test]
fn draw_without_login_fails_before_request() {
    let dir = workspace();
    sitetrack(&dir)
        .args(["sites", "draw", "--project", "1", "--coords", "0 0, 1 0, 1 1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Please log in"));
}

#[test]
fn draw_without_project_fails() {
    let dir = workspace();
    sitetrack(&dir)
        .args(["sites", "draw", "--coords", "0 0, 1 0, 1 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project given"));
}

#[test]
fn list_without_login_fails() {
    let dir = workspace();
    sitetrack(&dir)
        .args(["sites", "list"])
        .assert()
        .code(4);
}

#[test]
fn logout_when_logged_out() {
    let dir = workspace();
    sitetrack(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_removes_token() {
    let dir = workspace();
    fs::write(dir.path().join("token"), "abc").unwrap();

    sitetrack(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!dir.path().join("token").exists());
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    sitetrack(&dir)
        .args(["--config", "absent.toml", "logout"])
        .assert()
        .code(3);
}
