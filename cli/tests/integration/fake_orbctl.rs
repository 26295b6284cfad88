//! End-to-end tests against a scripted stand-in for `orbctl`.
//!
//! The fake appends its argv to `calls.log` and answers from a fixed
//! two-machine fleet: `web` (running) and `db` (stopped).

#![cfg(unix)]
#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FLEET: &str = r#"[{"id":"01WEB","name":"web","state":"running","image":{"distro":"ubuntu","version":"noble","arch":"arm64","variant":"default"},"config":{"isolated":false,"default_username":"alice"},"builtin":false},{"id":"01DB","name":"db","state":"stopped","image":{"distro":"debian","version":"12","arch":"amd64","variant":"default"},"config":{"isolated":true,"default_username":"alice"},"builtin":false}]"#;

struct Fake {
    dir: TempDir,
    program: PathBuf,
}

impl Fake {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let program = dir.path().join("orbctl");
        let log = dir.path().join("calls.log");
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
case "$1" in
  list)
    if [ "$2" = "--format" ]; then
      printf '%s\n' '{fleet}'
    else
      printf 'NAME  STATE\nweb   running\ndb    stopped\n'
    fi
    ;;
  run)
    shift 3
    echo "-bash: warning: setlocale: LC_ALL: cannot change locale (en_US.UTF-8)" >&2
    echo "ran: $*"
    ;;
  create)
    echo "image pulled"
    ;;
  logs)
    echo "boot ok"
    ;;
  info)
    echo "no such machine: $2" >&2
    exit 1
    ;;
esac
"#,
            log = log.display(),
            fleet = FLEET,
        );
        std::fs::write(&program, script).expect("write fake");
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");
        Self { dir, program }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("orbdeck"));
        cmd.env("NO_COLOR", "1")
            .env("ORBDECK_CONFIG", self.dir.path().join("config.yaml"))
            .env("ORBDECK_ORBCTL", &self.program)
            .env_remove("CI")
            .env_remove("ORBDECK_YES")
            .env_remove("RUST_LOG");
        cmd
    }

    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(ToString::to_string)
            .collect()
    }
}

#[test]
fn test_list_renders_fleet() {
    let fake = Fake::new();
    fake.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("running"))
        .stdout(predicate::str::contains("db"));
    assert_eq!(fake.calls(), ["list --format json"]);
}

#[test]
fn test_list_json_passes_records_through() {
    let fake = Fake::new();
    let output = fake.cmd().args(["list", "--json"]).output().expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v[1]["name"], "db");
    assert_eq!(v[1]["state"], "stopped");
}

#[test]
fn test_start_stopped_machine_uses_id() {
    let fake = Fake::new();
    fake.cmd()
        .args(["start", "db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db is running"));
    assert_eq!(fake.calls(), ["list --format json", "start 01DB"]);
}

#[test]
fn test_start_running_machine_is_a_no_op() {
    let fake = Fake::new();
    let output = fake
        .cmd()
        .args(["--json", "start", "web"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["applied"], false);
    assert_eq!(v["current"], "running");
    assert_eq!(fake.calls(), ["list --format json"]);
}

#[test]
fn test_stop_all() {
    let fake = Fake::new();
    fake.cmd().args(["stop", "--all"]).assert().success();
    assert_eq!(fake.calls(), ["stop --all"]);
}

#[test]
fn test_start_unknown_machine_is_not_found() {
    let fake = Fake::new();
    let output = fake
        .cmd()
        .args(["--json", "start", "cache"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["code"], "not_found");
}

#[test]
fn test_run_passes_argv_and_excuses_locale_warning() {
    let fake = Fake::new();
    fake.cmd()
        .args(["run", "-m", "web", "--", "ls", "-la"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ran: ls -la"));
    assert_eq!(fake.calls(), ["run -m web ls -la"]);
}

#[test]
fn test_info_failure_carries_stderr() {
    let fake = Fake::new();
    fake.cmd()
        .args(["info", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Machine Info: no such machine: ghost"));
}

#[test]
fn test_create_builds_command() {
    let fake = Fake::new();
    fake.cmd()
        .args([
            "create", "api", "--distro", "debian", "--distro-version", "12", "--arch", "x86_64",
            "-u", "bob",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("image pulled"))
        .stdout(predicate::str::contains("Machine api is ready"));
    assert_eq!(fake.calls(), ["create -u bob -a amd64 debian:12 api"]);
}

#[test]
fn test_tool_execute_confirmed_runs() {
    let fake = Fake::new();
    let output = fake
        .cmd()
        .args([
            "--json",
            "tool",
            "machine-execute-command",
            "--args",
            r#"{"machine_name":"db","command":["uname","-a"]}"#,
            "--confirmed",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["status"], "done");
    assert_eq!(v["output"], "ran: uname -a\n");
}

#[test]
fn test_tool_confirmation_can_be_disabled_in_config() {
    let fake = Fake::new();
    fake.cmd()
        .args(["config", "set", "tools.require_confirmation", "false"])
        .assert()
        .success();
    fake.cmd()
        .args([
            "tool",
            "machine-execute-command",
            "--args",
            r#"{"machine_name":"web","command":["id"]}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ran: id"));
    assert_eq!(fake.calls(), ["run -m web id"]);
}

#[test]
fn test_tool_list_returns_text_listing() {
    let fake = Fake::new();
    fake.cmd()
        .args(["tool", "machine-list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME  STATE"));
    assert_eq!(fake.calls(), ["list"]);
}

#[test]
fn test_delete_without_terminal_requires_yes() {
    let fake = Fake::new();
    fake.cmd()
        .args(["delete", "db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert!(fake.calls().is_empty());
}

#[test]
fn test_delete_with_yes() {
    let fake = Fake::new();
    fake.cmd()
        .args(["delete", "--yes", "db", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted db"));
    assert_eq!(fake.calls(), ["delete -f db", "delete -f web"]);
}

#[test]
fn test_ssh_print_shows_url_without_launching() {
    let fake = Fake::new();
    fake.cmd()
        .args(["ssh", "web", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ssh://alice@web@orb"));
    assert_eq!(fake.calls(), ["list --format json"]);
}
