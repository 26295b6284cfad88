//! Command implementations

pub mod config;
pub mod create;
pub mod delete;
pub mod distros;
pub mod info;
pub mod list;
pub mod logs;
pub mod mcp;
pub mod run;
pub mod ssh;
pub mod start;
pub mod stop;
pub mod tool;
pub mod version;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::machines;
use crate::domain::transition::RequestedState;

/// Arguments for naming a single machine.
#[derive(Args)]
pub struct MachineArg {
    /// Machine name
    pub name: String,
}

/// Arguments shared by `start` and `stop`.
#[derive(Args)]
pub struct ToggleArgs {
    /// Machine name or id
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub name: Option<String>,

    /// Apply to every machine
    #[arg(long)]
    pub all: bool,
}

/// Move one machine, or all of them, toward `requested`.
async fn toggle(app: &AppContext, args: &ToggleArgs, requested: RequestedState) -> Result<()> {
    if args.all {
        {
            let reporter = app.reporter().with_spinner();
            machines::toggle_all(&app.controller, &reporter, requested).await?;
        }
        return app.renderer().render_bulk(requested);
    }

    let Some(name) = args.name.as_deref() else {
        anyhow::bail!("machine name is required (or pass --all)");
    };
    let outcome = {
        let reporter = app.reporter().with_spinner();
        machines::transition_machine(&app.controller, &reporter, name, requested).await?
    };
    app.renderer().render_transition(&outcome)
}
