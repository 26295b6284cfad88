//! Interpretation of control-binary output.
//!
//! Pure functions: raw stdout/stderr in, typed result out.

use crate::domain::error::{CommandError, ParseError};
use crate::domain::machine::{Machine, MachineInfo};

/// Locale warning the shell inside a machine prints on every `orbctl run`.
///
/// It is the only stderr content that does not fail a command.
pub const BENIGN_STDERR: &str = "-bash: warning: setlocale: LC_ALL: cannot change locale";

/// Decide whether a finished call succeeded and return its display text.
///
/// Any non-empty stderr, whitespace included, fails the call unless it
/// contains [`BENIGN_STDERR`].
///
/// # Errors
///
/// Returns [`CommandError::Process`] carrying the stderr text.
pub fn interpret(stdout: &str, stderr: &str) -> Result<String, CommandError> {
    if stderr.is_empty() || stderr.contains(BENIGN_STDERR) {
        return Ok(stdout.to_string());
    }
    Err(CommandError::Process {
        stderr: stderr.trim_end().to_string(),
    })
}

/// Like [`interpret`], but also fails a non-zero exit.
///
/// A failing exit with stderr reports the stderr; with empty stderr it
/// reports the exit code (`-1` when the process was killed by a signal).
///
/// # Errors
///
/// Returns a [`CommandError`] when the call failed.
pub fn interpret_exit(
    success: bool,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<String, CommandError> {
    if success {
        return interpret(stdout, stderr);
    }
    if stderr.trim().is_empty() {
        return Err(CommandError::ExitStatus {
            code: code.unwrap_or(-1),
        });
    }
    Err(CommandError::Process {
        stderr: stderr.trim_end().to_string(),
    })
}

/// Parse `orbctl list --format json`.
///
/// # Errors
///
/// Returns a [`ParseError`] when stdout is not a JSON array of machines.
pub fn parse_machine_list(stdout: &str) -> Result<Vec<Machine>, ParseError> {
    serde_json::from_str(stdout).map_err(|source| ParseError {
        what: "machine list",
        source,
    })
}

/// Parse `orbctl info <name> --format json`.
///
/// # Errors
///
/// Returns a [`ParseError`] when stdout is not a machine info record.
pub fn parse_machine_info(stdout: &str) -> Result<MachineInfo, ParseError> {
    serde_json::from_str(stdout).map_err(|source| ParseError {
        what: "machine info",
        source,
    })
}
