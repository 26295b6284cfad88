//! `orbdeck ssh <name>` — open a terminal with an SSH session.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{machines, tools};
use crate::domain::tool_args::BaseArgs;

/// Arguments for the ssh command.
#[derive(Args)]
pub struct SshArgs {
    /// Machine name or id
    pub name: String,

    /// Print the SSH URL without opening a terminal
    #[arg(long)]
    pub print: bool,
}

/// Run `orbdeck ssh`.
///
/// # Errors
///
/// Returns an error if the machine is unknown or the terminal cannot be opened.
pub async fn run(app: &AppContext, args: &SshArgs) -> Result<()> {
    let machine = machines::find_machine(&app.controller, &app.reporter(), &args.name).await?;
    if !args.print {
        let target = BaseArgs {
            machine_name: machine.name.clone(),
        };
        tools::machine_open(&app.terminal, &target).await?;
    }
    app.renderer().render_ssh(&machine, !args.print)
}
