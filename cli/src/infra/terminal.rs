//! Infrastructure implementation of the `TerminalLauncher` port.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, TerminalLauncher};

/// Opens SSH sessions in a macOS terminal application via `osascript`.
pub struct OsascriptTerminal<R: CommandRunner> {
    app: String,
    runner: R,
}

impl<R: CommandRunner> OsascriptTerminal<R> {
    pub fn new(app: impl Into<String>, runner: R) -> Self {
        Self {
            app: app.into(),
            runner,
        }
    }
}

/// AppleScript that asks `app` to run `ssh <machine>@orb` in a new window.
///
/// The target is passed through `quoted form of`, so the login shell sees
/// it as one word.
#[must_use]
pub fn open_script(app: &str, machine: &str) -> String {
    format!(
        "tell application \"{}\" to do script (\"ssh \" & quoted form of \"{}@orb\")",
        escape(app),
        escape(machine)
    )
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl<R: CommandRunner> TerminalLauncher for OsascriptTerminal<R> {
    async fn open_ssh(&self, machine: &str) -> Result<Output> {
        let script = open_script(&self.app, machine);
        tracing::debug!(app = %self.app, machine, "opening terminal");
        self.runner
            .run("osascript", &["-e", &script])
            .await
            .context("osascript")
    }
}
