//! Domain types and validators for OrbDeck configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::machine::ORBCTL;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "orbctl.path",
    "timeouts.command_secs",
    "timeouts.create_secs",
    "tools.require_confirmation",
    "terminal.app",
];

/// Default timeout for control commands (list, info, start, stop, run…).
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Machine creation downloads an image, so it gets a longer bound.
pub const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 120;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.orbdeck/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrbdeckConfig {
    pub orbctl: OrbctlConfig,
    pub timeouts: TimeoutConfig,
    pub tools: ToolsConfig,
    pub terminal: TerminalConfig,
}

/// Where to find the control binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbctlConfig {
    #[serde(default = "default_orbctl_path")]
    pub path: String,
}

impl Default for OrbctlConfig {
    fn default() -> Self {
        Self {
            path: default_orbctl_path(),
        }
    }
}

/// Process timeouts in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_command_secs")]
    pub command_secs: u64,
    #[serde(default = "default_create_secs")]
    pub create_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            command_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            create_secs: DEFAULT_CREATE_TIMEOUT_SECS,
        }
    }
}

/// Agent tool behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Return a confirmation prompt instead of running create/execute tools
    /// until the caller passes `confirmed: true`.
    #[serde(default = "default_true")]
    pub require_confirmation: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            require_confirmation: true,
        }
    }
}

/// Terminal emulator used for interactive sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_terminal_app")]
    pub app: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            app: default_terminal_app(),
        }
    }
}

fn default_orbctl_path() -> String {
    ORBCTL.to_string()
}

fn default_command_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

fn default_create_secs() -> u64 {
    DEFAULT_CREATE_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_terminal_app() -> String {
    "Terminal".to_string()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let expected = match key {
        "timeouts.command_secs" | "timeouts.create_secs" => {
            match value.parse::<u64>() {
                Ok(secs) if secs > 0 => return Ok(()),
                _ => "a positive number of seconds",
            }
        }
        "tools.require_confirmation" => {
            if value.parse::<bool>().is_ok() {
                return Ok(());
            }
            "true or false"
        }
        "orbctl.path" | "terminal.app" => {
            if !value.trim().is_empty() {
                return Ok(());
            }
            "a non-empty value"
        }
        _ => return validate_config_key(key),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
    .into())
}

/// Apply a validated key/value pair to `config`.
///
/// # Errors
///
/// Returns an error if the key or value is invalid.
pub fn apply_config_value(config: &mut OrbdeckConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "orbctl.path" => config.orbctl.path = value.to_string(),
        "timeouts.command_secs" => config.timeouts.command_secs = value.parse()?,
        "timeouts.create_secs" => config.timeouts.create_secs = value.parse()?,
        "tools.require_confirmation" => config.tools.require_confirmation = value.parse()?,
        "terminal.app" => config.terminal.app = value.to_string(),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}
