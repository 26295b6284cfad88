//! Shared test helpers: output constructors and `orbctl` JSON fixtures.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Exit 0 with something on stderr.
pub fn noisy_output(stdout: &str, stderr: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

pub fn err_output(code: i32, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const LOCALE_WARNING: &str = "-bash: warning: setlocale: LC_ALL: cannot change locale (en_US.UTF-8)\n";

/// One machine record as `orbctl list --format json` prints it.
pub fn machine_json(id: &str, name: &str, state: &str) -> String {
    format!(
        r#"{{"id":"{id}","name":"{name}","state":"{state}",
            "image":{{"distro":"ubuntu","version":"noble","arch":"arm64","variant":"default"}},
            "config":{{"isolated":false,"default_username":"alice"}},
            "builtin":false}}"#
    )
}

/// `orbctl list --format json` with the given `(id, name, state)` machines.
pub fn list_json(machines: &[(&str, &str, &str)]) -> String {
    let items: Vec<String> = machines
        .iter()
        .map(|(id, name, state)| machine_json(id, name, state))
        .collect();
    format!("[{}]", items.join(","))
}

/// `orbctl info <name> --format json`.
pub fn info_json(name: &str, disk_size: u64) -> String {
    format!(
        r#"{{"record":{},"disk_size":{disk_size}}}"#,
        machine_json("01HQ", name, "running")
    )
}
