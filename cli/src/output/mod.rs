//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::{LogReporter, TerminalReporter};
pub use styles::Styles;

use crate::application::services::machines::TransitionOutcome;
use crate::application::services::tools::ToolReply;
use crate::domain::config::OrbdeckConfig;
use crate::domain::machine::{Machine, MachineInfo};
use crate::domain::transition::RequestedState;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠` to stderr. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Mode-dispatching renderer handed out by `AppContext::renderer()`.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_machines(&self, machines: &[Machine]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_machines(machines);
                Ok(())
            }
            Self::Json(r) => r.render_machines(machines),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_info(&self, info: &MachineInfo) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_info(info);
                Ok(())
            }
            Self::Json(r) => r.render_info(info),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_transition(&self, outcome: &TransitionOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_transition(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_transition(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_bulk(&self, requested: RequestedState) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_bulk(requested);
                Ok(())
            }
            Self::Json(r) => r.render_bulk(requested.as_str()),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_text(&self, text: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_text(text);
                Ok(())
            }
            Self::Json(r) => r.render_text(text),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_created(&self, name: &str, output: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_created(name, output);
                Ok(())
            }
            Self::Json(r) => r.render_created(name, output),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deleted(&self, names: &[String]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_deleted(names);
                Ok(())
            }
            Self::Json(r) => r.render_deleted(names),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_ssh(&self, machine: &Machine, opened: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_ssh(machine, opened);
                Ok(())
            }
            Self::Json(r) => r.render_ssh(machine, opened),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_distros(&self) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_distros();
                Ok(())
            }
            Self::Json(r) => r.render_distros(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &OrbdeckConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_tool_reply(&self, tool: &str, reply: &ToolReply) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_tool_reply(reply);
                Ok(())
            }
            Self::Json(r) => r.render_tool_reply(tool, reply),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }
}
