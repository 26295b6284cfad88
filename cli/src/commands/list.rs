//! `orbdeck list` — show every machine with its state.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::machines;

/// Run `orbdeck list`.
///
/// # Errors
///
/// Returns an error if `orbctl list` fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let machines = machines::list_machines(&app.controller, &app.reporter()).await?;
    app.renderer().render_machines(&machines)
}
