//! Integration tests for the `dnacly` CLI binary.
//!
//! Argument parsing, help output, shell completions, config handling and
//! error exit codes run without a controller. The inventory tests point the
//! binary at a wiremock server through the hidden `--base-url` flag.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dnacly` binary with env isolation.
///
/// Clears all `DNACLY_*` env vars and points config and cache
/// directories into `home` so tests never touch the user's real setup.
fn dnacly_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dnacly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env("DNACLY_CONFIG", home.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    for var in [
        "DNACLY_PROFILE",
        "DNACLY_HOST",
        "DNACLY_PORT",
        "DNACLY_USERNAME",
        "DNACLY_PASSWORD",
        "DNACLY_BASE_URL",
        "DNACLY_OUTPUT",
        "DNACLY_INSECURE",
        "DNACLY_TIMEOUT",
        "DNACLY_NO_SESSION",
        "DNACLY_AUDIT_URI",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn controller() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Token": "T" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/network-device"))
        .and(header("X-Auth-Token", "T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [
                { "id": "dev-0", "hostname": "core-sw", "managementIpAddress": "10.0.0.1" },
                { "id": "dev-1", "hostname": "edge-rtr", "managementIpAddress": "10.0.0.5" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/interface"))
        .and(query_param("deviceId", "dev-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [ { "portName": "GigabitEthernet0/0/1", "status": "up" } ]
        })))
        .mount(&server)
        .await;
    server
}

fn against(cmd: &mut assert_cmd::Command, server: &MockServer) {
    cmd.args([
        "--host",
        "sandbox.invalid",
        "-u",
        "devnetuser",
        "--base-url",
        &server.uri(),
    ])
    .env("DNACLY_PASSWORD", "Cisco123!");
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = dnacly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("DNA Center")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("interfaces"))
            .and(predicate::str::contains("logout")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dnacly"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = dnacly_cmd(home.path()).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("foobar"), "Expected mention of 'foobar':\n{text}");
}

#[test]
fn test_interfaces_requires_ip() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .arg("interfaces")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("DEVICE_IP"));
}

#[test]
fn test_devices_without_config() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .arg("devices")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_devices_with_host_but_no_credentials() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["--host", "10.10.20.85", "devices"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No credentials"));
}

#[test]
fn test_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["--profile", "nope", "devices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_unreachable_controller_fails_authentication() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args([
            "--host",
            "127.0.0.1",
            "--port",
            "1",
            "-u",
            "devnetuser",
            "--no-session",
            "devices",
        ])
        .env("DNACLY_PASSWORD", "pw")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Authentication error"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_env() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_profiles_empty() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_config_set_creates_profile() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["-p", "lab", "config", "set", "host", "10.10.20.85"])
        .assert()
        .success();
    dnacly_cmd(home.path())
        .args(["-p", "lab", "config", "set", "port", "8443"])
        .assert()
        .success();

    let written = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("[profiles.lab]"), "{written}");
    assert!(written.contains("port = 8443"), "{written}");

    dnacly_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab"));
}

#[test]
fn test_config_set_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["config", "set", "port", "not-a-port"])
        .assert()
        .code(2);
    dnacly_cmd(home.path())
        .args(["config", "set", "colour", "blue"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn test_config_show_masks_password() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "default_profile = \"lab\"\n\n[profiles.lab]\nhost = \"10.10.20.85\"\n\
         username = \"admin\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    for format in ["table", "json"] {
        dnacly_cmd(home.path())
            .args(["config", "show", "-o", format])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("****")
                    .and(predicate::str::contains("hunter2").not())
                    .and(predicate::str::contains("10.10.20.85")),
            );
    }
}

#[test]
fn test_config_use_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["config", "use", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_logout_without_session_is_ok() {
    let home = tempfile::tempdir().unwrap();
    dnacly_cmd(home.path())
        .args(["-p", "lab", "logout"])
        .assert()
        .success();
}

// ── Against a mock controller ───────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_json_against_mock() {
    let server = controller().await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = dnacly_cmd(home.path());
    against(&mut cmd, &server);
    cmd.args(["--no-session", "devices", "-o", "json"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 2);
    assert_eq!(devices[1]["managementIpAddress"], "10.0.0.5");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_interfaces_plain_writes_audit_record() {
    let server = controller().await;
    let home = tempfile::tempdir().unwrap();
    let store = home.path().join("audit");

    let mut cmd = dnacly_cmd(home.path());
    against(&mut cmd, &server);
    cmd.args(["--no-session", "--audit-uri"])
        .arg(&store)
        .args(["interfaces", "10.0.0.5", "-o", "plain"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "GigabitEthernet0/0/1"
    );

    let log = std::fs::read_to_string(store.join("dnacly").join("dnac_logs.jsonl")).unwrap();
    let records: Vec<serde_json::Value> = log
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["action"], "show_interfaces");
    assert_eq!(records[0]["status"], "success");
    assert_eq!(records[0]["device_ip"], "10.0.0.5");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_mongo_store_keeps_output() {
    let server = controller().await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = dnacly_cmd(home.path());
    against(&mut cmd, &server);
    cmd.args([
        "--no-session",
        "--audit-uri",
        "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200",
        "devices",
        "-o",
        "json",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_device_exits_not_found() {
    let server = controller().await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = dnacly_cmd(home.path());
    against(&mut cmd, &server);
    cmd.args(["--no-session", "interfaces", "10.9.9.9"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Device 10.9.9.9 not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_auth_caches_token_for_next_run() {
    let server = controller().await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = dnacly_cmd(home.path());
    against(&mut cmd, &server);
    cmd.args(["auth", "-o", "plain"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "T");

    let mut cmd = dnacly_cmd(home.path());
    against(&mut cmd, &server);
    cmd.arg("devices");
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let logins = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method == wiremock::http::Method::POST)
        .count();
    assert_eq!(logins, 1, "second run should reuse the cached token");

    let mut cmd = dnacly_cmd(home.path());
    cmd.arg("logout");
    let output = run(cmd).await;
    assert!(output.status.success());
}
