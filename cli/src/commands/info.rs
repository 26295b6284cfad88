//! `orbdeck info <name>` — detail view of one machine.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::machines;
use crate::commands::MachineArg;

/// Run `orbdeck info`.
///
/// Unparseable output has already been reported as a warning; nothing else
/// is printed in that case.
///
/// # Errors
///
/// Returns an error if `orbctl info` fails.
pub async fn run(app: &AppContext, args: &MachineArg) -> Result<()> {
    match machines::machine_info(&app.controller, &app.reporter(), &args.name).await? {
        Some(info) => app.renderer().render_info(&info),
        None => Ok(()),
    }
}
