//! `orbdeck run -m <name> -- <command...>` — run a command inside a machine.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::machines;
use crate::domain::tool_args::CommandArgs;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Machine to run in (started automatically if stopped)
    #[arg(short, long = "machine")]
    pub machine: String,

    /// Command and its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Run `orbdeck run`.
///
/// The command is passed to `orbctl run` as separate arguments; no local
/// shell parses it.
///
/// # Errors
///
/// Returns an error if the command fails or writes to stderr.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<()> {
    let command = CommandArgs {
        machine_name: args.machine.clone(),
        command: args.command.clone(),
    };
    let stdout = machines::run_command(&app.controller, &command).await?;
    app.renderer().render_text(&stdout)
}
