//! `orbdeck logs <name>` — raw machine logs.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::machines;
use crate::commands::MachineArg;

/// Run `orbdeck logs`.
///
/// # Errors
///
/// Returns an error if `orbctl logs` fails.
pub async fn run(app: &AppContext, args: &MachineArg) -> Result<()> {
    let text = machines::machine_logs(&app.controller, &args.name).await?;
    app.renderer().render_text(&text)
}
