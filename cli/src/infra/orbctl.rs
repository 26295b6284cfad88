//! Infrastructure implementation of the machine port traits.
//!
//! `OrbctlController<R>` routes every `orbctl` call through a `CommandRunner`,
//! so tests can inject a recording runner instead of spawning processes.

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandRunner, MachineInspector, MachineLifecycle, MachineShell, OutputFormat,
};
use crate::domain::OrbdeckConfig;
use crate::infra::command_runner::TokioCommandRunner;

/// Environment override for the control binary, ahead of `orbctl.path`.
pub const ORBCTL_ENV: &str = "ORBDECK_ORBCTL";

/// Adapter that drives OrbStack through its `orbctl` binary.
pub struct OrbctlController<R: CommandRunner> {
    program: String,
    runner: R,
    create_timeout: Duration,
}

impl<R: CommandRunner> OrbctlController<R> {
    /// Create a controller with an explicit runner.
    pub fn new(program: impl Into<String>, runner: R, create_timeout: Duration) -> Self {
        Self {
            program: program.into(),
            runner,
            create_timeout,
        }
    }

    /// The binary every call goes through.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn call(&self, args: &[&str], what: &str) -> Result<Output> {
        self.runner
            .run(&self.program, args)
            .await
            .with_context(|| format!("orbctl {what}"))
    }
}

impl OrbctlController<TokioCommandRunner> {
    /// Production controller built from configuration.
    ///
    /// `ORBDECK_ORBCTL` takes precedence over `orbctl.path`.
    #[must_use]
    pub fn from_config(config: &OrbdeckConfig) -> Self {
        let program = std::env::var(ORBCTL_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| config.orbctl.path.clone());
        Self::new(
            program,
            TokioCommandRunner::new(Duration::from_secs(config.timeouts.command_secs)),
            Duration::from_secs(config.timeouts.create_secs),
        )
    }
}

fn with_format<'a>(mut args: Vec<&'a str>, format: OutputFormat) -> Vec<&'a str> {
    if format == OutputFormat::Json {
        args.extend_from_slice(&["--format", "json"]);
    }
    args
}

impl<R: CommandRunner> MachineInspector for OrbctlController<R> {
    async fn list(&self, format: OutputFormat) -> Result<Output> {
        self.call(&with_format(vec!["list"], format), "list").await
    }

    async fn info(&self, name: &str, format: OutputFormat) -> Result<Output> {
        self.call(&with_format(vec!["info", name], format), "info")
            .await
    }

    async fn logs(&self, name: &str) -> Result<Output> {
        self.call(&["logs", name], "logs").await
    }

    async fn config_show(&self) -> Result<Output> {
        self.call(&["config", "show"], "config show").await
    }
}

impl<R: CommandRunner> MachineLifecycle for OrbctlController<R> {
    async fn transition(&self, command: &[String]) -> Result<Output> {
        let args: Vec<&str> = command.iter().map(String::as_str).collect();
        let what = args.first().copied().unwrap_or("transition");
        self.call(&args, what).await
    }

    async fn start_all(&self) -> Result<Output> {
        self.call(&["start", "--all"], "start --all").await
    }

    async fn stop_all(&self) -> Result<Output> {
        self.call(&["stop", "--all"], "stop --all").await
    }

    async fn create(&self, command: &[String]) -> Result<Output> {
        let args: Vec<&str> = command.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(&self.program, &args, self.create_timeout)
            .await
            .context("orbctl create")
    }

    async fn delete(&self, name: &str) -> Result<Output> {
        self.call(&["delete", "-f", name], "delete").await
    }
}

impl<R: CommandRunner> MachineShell for OrbctlController<R> {
    async fn run_in(&self, name: &str, command: &[String]) -> Result<Output> {
        let mut args = vec!["run", "-m", name];
        args.extend(command.iter().map(String::as_str));
        self.call(&args, "run").await
    }
}
