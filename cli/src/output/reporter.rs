//! Presentation-layer implementations of `ProgressReporter`.
//!
//! Services emit progress through the port; these types decide where it
//! goes. Warnings always go to stderr so stdout stays parseable in `--json`
//! mode and clean for the MCP transport.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`, or updates the spinner when one is active
/// - `success()` prints `"  ✓ {message}"`, or finishes the spinner
/// - `warn()` prints `"  ! {message}"` to stderr
///
/// `step` and `success` are suppressed when `quiet` or `silent`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    silent: bool,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            silent: false,
            spinner: None,
        }
    }

    /// A reporter that only emits warnings (JSON mode).
    #[must_use]
    pub fn silent(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            silent: true,
            spinner: None,
        }
    }

    /// Route steps through a spinner when the terminal can show one.
    #[must_use]
    pub fn with_spinner(mut self) -> Self {
        if !self.silent && self.ctx.show_progress() {
            self.spinner = Some(progress::spinner(""));
        }
        self
    }

    fn chatty(&self) -> bool {
        !self.silent && !self.ctx.quiet
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.chatty() {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => println!("  {} {message}", "→".style(self.ctx.styles.info)),
        }
    }

    fn success(&self, message: &str) {
        if !self.chatty() {
            return;
        }
        match &self.spinner {
            Some(pb) => progress::finish_ok(pb, message),
            None => println!("  {} {message}", "✓".style(self.ctx.styles.success)),
        }
    }

    fn warn(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        let line = format!("  {} {message}", "!".style(self.ctx.styles.warning));
        match &self.spinner {
            Some(pb) => pb.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some(pb) = &self.spinner
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// Reporter for non-terminal surfaces (the MCP server): events go to the
/// tracing subscriber only.
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn step(&self, message: &str) {
        tracing::debug!(message, "step");
    }

    fn success(&self, message: &str) {
        tracing::debug!(message, "success");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(message, "warning");
    }
}
