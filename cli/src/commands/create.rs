//! `orbdeck create` — create a new machine.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::machines;
use crate::domain::tool_args::CreateArgs;

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateCmdArgs {
    /// Name of the new machine (dashes, not underscores)
    pub name: String,

    /// Linux distro (see `orbdeck distros`)
    #[arg(short, long)]
    pub distro: String,

    /// Distro version, e.g. `12` for debian
    #[arg(id = "distro_version", long = "distro-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Default username inside the machine
    #[arg(short, long)]
    pub user: Option<String>,

    /// CPU architecture: arm64 (default) or x86_64/amd64
    #[arg(short, long)]
    pub arch: Option<String>,
}

impl From<&CreateCmdArgs> for CreateArgs {
    fn from(args: &CreateCmdArgs) -> Self {
        Self {
            machine_name: args.name.clone(),
            distro: args.distro.clone(),
            version: args.version.clone(),
            user_name: args.user.clone(),
            architecture: args.arch.clone(),
        }
    }
}

/// Run `orbdeck create`.
///
/// # Errors
///
/// Returns a validation error before anything runs, or an error if
/// `orbctl create` fails or exceeds the creation timeout.
pub async fn run(app: &AppContext, args: &CreateCmdArgs) -> Result<()> {
    let create = CreateArgs::from(args);
    let output = {
        let reporter = app.reporter().with_spinner();
        machines::create_machine(&app.controller, &reporter, &create).await?
    };
    app.renderer().render_created(&create.machine_name, &output)
}
