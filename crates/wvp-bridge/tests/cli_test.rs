//! Integration tests for the `wvp-bridge` binary.
//!
//! Flag parsing, help output and configuration errors. Nothing here
//! binds a port or talks to a remote server.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// `wvp-bridge` with the environment overrides this crate reads removed.
fn bridge_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wvp-bridge");
    cmd.env_remove("PLUGIN_WVP_CONFIG")
        .env_remove("PLUGIN_WVP_HTTP_SERVER__ADDRESS")
        .env_remove("PLUGIN_WVP_PLATFORM__BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    bridge_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("WVP")
            .and(predicate::str::contains("--config"))
            .and(predicate::str::contains("--log-json")),
    );
}

#[test]
fn test_version_flag() {
    bridge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    bridge_cmd().arg("--no-such-flag").assert().code(2);
}

// ── Configuration check ─────────────────────────────────────────────

#[test]
fn test_check_accepts_valid_config() {
    let file = config_file(
        r#"
        [http_server]
        address = "127.0.0.1:0"

        [platform]
        base_url = "http://127.0.0.1:9999"
        "#,
    );

    bridge_cmd()
        .arg("--check")
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration OK"));
}

#[test]
fn test_check_with_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    bridge_cmd()
        .arg("--check")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .success();
}

#[test]
fn test_invalid_config_exits_with_config_code() {
    let file = config_file("[platform]\ntimeout_secs = 0\n");

    bridge_cmd()
        .arg("--check")
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_bad_listen_flag_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    bridge_cmd()
        .arg("--check")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--listen")
        .arg("nowhere")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nowhere"));
}
