//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::OrbdeckConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Output format requested from `orbctl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table/text.
    Text,
    /// `--format json`.
    Json,
}

// ── Machine Port Traits ───────────────────────────────────────────────────────

/// Read-only machine queries.
#[allow(async_fn_in_trait)]
pub trait MachineInspector {
    /// `orbctl list [--format json]`.
    async fn list(&self, format: OutputFormat) -> Result<Output>;
    /// `orbctl info <name> [--format json]`.
    async fn info(&self, name: &str, format: OutputFormat) -> Result<Output>;
    /// `orbctl logs <name>`.
    async fn logs(&self, name: &str) -> Result<Output>;
    /// `orbctl config show`.
    async fn config_show(&self) -> Result<Output>;
}

/// Machine lifecycle operations.
#[allow(async_fn_in_trait)]
pub trait MachineLifecycle {
    /// Run a guard-approved transition command, e.g. `["start", id]`.
    async fn transition(&self, command: &[String]) -> Result<Output>;
    /// `orbctl start --all`.
    async fn start_all(&self) -> Result<Output>;
    /// `orbctl stop --all`.
    async fn stop_all(&self) -> Result<Output>;
    /// Run a built `create …` command under the creation timeout.
    async fn create(&self, command: &[String]) -> Result<Output>;
    /// `orbctl delete -f <name>`.
    async fn delete(&self, name: &str) -> Result<Output>;
}

/// Command execution inside a machine.
#[allow(async_fn_in_trait)]
pub trait MachineShell {
    /// `orbctl run -m <name> <command…>`, output captured.
    async fn run_in(&self, name: &str, command: &[String]) -> Result<Output>;
}

/// Composite trait — any type implementing all three sub-traits is a `MachineController`.
pub trait MachineController: MachineInspector + MachineLifecycle + MachineShell {}

/// Blanket implementation: any type implementing all three sub-traits is a `MachineController`.
impl<T> MachineController for T where T: MachineInspector + MachineLifecycle + MachineShell {}

// ── Terminal Port ─────────────────────────────────────────────────────────────

/// Opens an interactive session in a terminal emulator.
///
/// The launched session is not managed: it outlives the call.
#[allow(async_fn_in_trait)]
pub trait TerminalLauncher {
    /// Open a terminal running `ssh <machine>@orb`.
    async fn open_ssh(&self, machine: &str) -> Result<Output>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults when no file exists.
    fn load(&self) -> Result<OrbdeckConfig>;
    /// Persist configuration.
    fn save(&self, config: &OrbdeckConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
