//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Malformed or missing tool arguments, detected before any process launch.
///
/// Messages are phrased for an agent: they say what to ask the user for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("machine_name is required. Ask the user for the machine name.")]
    MissingMachineName,

    #[error("command is required. Ask the user for the command to run.")]
    MissingCommand,

    #[error(
        "machine_name is required. Ask the user for the machine name. \
Machine names cannot have underscores; use dashes instead."
    )]
    UnderscoreInName,

    #[error(
        "machine_name '{0}' is not valid. Names may only contain letters, digits, dots, \
dashes, and underscores, and cannot start with a dash or dot."
    )]
    InvalidMachineName(String),

    #[error("distro must be one of the following: {supported}")]
    UnsupportedDistro { distro: String, supported: String },

    #[error("architecture must be either arm64 or x86_64")]
    UnsupportedArchitecture(String),

    #[error("user_name cannot be empty. Ask the user for the username.")]
    BlankUserName,

    #[error("version cannot be empty. Ask the user for the distro version.")]
    BlankVersion,
}

// ── Command errors ────────────────────────────────────────────────────────────

/// A control-binary invocation that completed but reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Non-empty stderr that is not the excused locale warning.
    #[error("{stderr}")]
    Process { stderr: String },

    /// Non-zero exit with nothing on stderr.
    #[error("command exited with status {code}")]
    ExitStatus { code: i32 },
}

impl CommandError {
    /// Stable code used in JSON error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Process { .. } => "process_error",
            Self::ExitStatus { .. } => "exit_status",
        }
    }
}

// ── Parse errors ──────────────────────────────────────────────────────────────

/// Malformed JSON from an otherwise successful call.
#[derive(Debug, Error)]
#[error("Failed to parse {what}: {source}")]
pub struct ParseError {
    pub what: &'static str,
    #[source]
    pub source: serde_json::Error,
}

// ── Lookup errors ─────────────────────────────────────────────────────────────

/// Errors resolving a machine reference against a fresh listing.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Machine '{0}' not found. Run 'orbdeck list' to see available machines.")]
    NotFound(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
