//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document on
//! stdout. Failures use the error object from [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

use crate::application::services::machines::TransitionOutcome;
use crate::application::services::tools::ToolReply;
use crate::domain::config::OrbdeckConfig;
use crate::domain::error::{CommandError, ConfigError, MachineError, ParseError, ValidationError};
use crate::domain::machine::{Architecture, Distro, Machine, MachineInfo};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable error code for the first typed domain error in the chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if cause.downcast_ref::<ValidationError>().is_some() {
            return "validation_error";
        }
        if let Some(e) = cause.downcast_ref::<CommandError>() {
            return e.code();
        }
        if cause.downcast_ref::<ParseError>().is_some() {
            return "parse_error";
        }
        if cause.downcast_ref::<MachineError>().is_some() {
            return "not_found";
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "config_error";
        }
    }
    "error"
}

/// Renders results as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Serialize any payload to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{text}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_machines(&self, machines: &[Machine]) -> Result<()> {
        Self::print(machines)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_info(&self, info: &MachineInfo) -> Result<()> {
        Self::print(info)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_transition(&self, outcome: &TransitionOutcome) -> Result<()> {
        Self::print(&transition_payload(outcome))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_bulk(&self, requested: &str) -> Result<()> {
        Self::print(&json!({ "all": true, "requested": requested, "applied": true }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_text(&self, text: &str) -> Result<()> {
        Self::print(&json!({ "output": text }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_created(&self, name: &str, output: &str) -> Result<()> {
        Self::print(&json!({ "machine": name, "created": true, "output": output }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_deleted(&self, names: &[String]) -> Result<()> {
        Self::print(&json!({ "deleted": names }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_ssh(&self, machine: &Machine, opened: bool) -> Result<()> {
        Self::print(&json!({
            "machine": machine.name,
            "ssh_url": machine.ssh_url(),
            "opened": opened,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_distros(&self) -> Result<()> {
        Self::print(&distros_payload())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &OrbdeckConfig, path: &Path) -> Result<()> {
        Self::print(&json!({ "path": path.display().to_string(), "config": config }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_tool_reply(&self, tool: &str, reply: &ToolReply) -> Result<()> {
        Self::print(&tool_reply_payload(tool, reply))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&json!({ "version": version }))
    }
}

#[must_use]
pub fn transition_payload(outcome: &TransitionOutcome) -> serde_json::Value {
    match outcome {
        TransitionOutcome::Applied { machine, requested } => json!({
            "machine": machine,
            "requested": requested.as_str(),
            "applied": true,
        }),
        TransitionOutcome::Skipped {
            machine,
            current,
            requested,
        } => json!({
            "machine": machine,
            "requested": requested.as_str(),
            "current": current.as_str(),
            "applied": false,
        }),
    }
}

#[must_use]
pub fn distros_payload() -> serde_json::Value {
    let distros: Vec<_> = Distro::ALL
        .iter()
        .map(|d| json!({ "value": d.value(), "title": d.title() }))
        .collect();
    let architectures: Vec<_> = Architecture::ALL
        .iter()
        .map(|a| json!({ "value": a.value(), "title": a.title() }))
        .collect();
    json!({ "distros": distros, "architectures": architectures })
}

#[must_use]
pub fn tool_reply_payload(tool: &str, reply: &ToolReply) -> serde_json::Value {
    match reply {
        ToolReply::Done(text) => json!({ "tool": tool, "status": "done", "output": text }),
        ToolReply::NeedsConfirmation(prompt) => json!({
            "tool": tool,
            "status": "needs_confirmation",
            "prompt": prompt,
        }),
    }
}
