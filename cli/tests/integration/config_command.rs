//! Integration tests for `orbdeck config`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn orbdeck(config: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("orbdeck"));
    cmd.env("NO_COLOR", "1").env("ORBDECK_CONFIG", config);
    cmd
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    orbdeck(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeouts.create_secs:"))
        .stdout(predicate::str::contains("120"))
        .stdout(predicate::str::contains("ORBDECK_CONFIG"));
    assert!(!path.exists(), "show must not create the file");
}

#[test]
fn test_config_set_persists() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    orbdeck(&path)
        .args(["config", "set", "terminal.app", "iTerm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set terminal.app = iTerm"));

    let written = std::fs::read_to_string(&path).expect("config written");
    assert!(written.contains("app: iTerm"));

    let output = orbdeck(&path)
        .args(["config", "show", "--json"])
        .output()
        .expect("run");
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["config"]["terminal"]["app"], "iTerm");
    assert_eq!(v["path"], path.display().to_string());
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    orbdeck(&path)
        .args(["config", "set", "security.level", "high"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: security.level"));
    assert!(!path.exists());
}

#[test]
fn test_config_set_invalid_value_json_code() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    let output = orbdeck(&path)
        .args(["--json", "config", "set", "timeouts.command_secs", "0"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["code"], "config_error");
}

#[test]
fn test_config_unparseable_file_fails_every_command() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "timeouts: [").expect("write");
    orbdeck(&path)
        .arg("distros")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading configuration"));
}
