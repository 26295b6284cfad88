//! `orbdeck distros` — distros and architectures `create` accepts.

use anyhow::Result;

use crate::app::AppContext;

/// Run `orbdeck distros`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext) -> Result<()> {
    app.renderer().render_distros()
}
