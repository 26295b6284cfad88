//! Application context — unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()`. Adding a cross-cutting concern means
//! one field change here and no command signature changes.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::config_service;
use crate::domain::OrbdeckConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::orbctl::OrbctlController;
use crate::infra::terminal::OsascriptTerminal;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `ORBDECK_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Loaded configuration.
    pub config: OrbdeckConfig,
    /// Configuration persistence.
    pub config_store: YamlConfigStore,
    /// `orbctl` adapter.
    pub controller: OrbctlController<TokioCommandRunner>,
    /// Terminal launcher for SSH sessions.
    pub terminal: OsascriptTerminal<TokioCommandRunner>,
    /// When `true`, skip interactive prompts.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `ORBDECK_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("ORBDECK_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_service::load_config(&config_store).context("loading configuration")?;
        let controller = OrbctlController::from_config(&config);
        let terminal = OsascriptTerminal::new(
            config.terminal.app.clone(),
            TokioCommandRunner::new(Duration::from_secs(config.timeouts.command_secs)),
        );
        tracing::debug!(orbctl = controller.program(), ?mode, non_interactive, "context ready");

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config,
            config_store,
            controller,
            terminal,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for the current output mode.
    ///
    /// In JSON mode only warnings are emitted, on stderr.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        match self.mode {
            OutputMode::Human => TerminalReporter::new(&self.output),
            OutputMode::Json => TerminalReporter::silent(&self.output),
        }
    }

    /// Whether a prompt can be shown at all.
    #[must_use]
    pub fn can_prompt(&self) -> bool {
        !self.non_interactive && !self.is_json() && self.output.is_tty
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `ORBDECK_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
