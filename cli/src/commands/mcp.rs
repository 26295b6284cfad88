//! `orbdeck mcp` — serve the machine tools to an agent over stdio.

use anyhow::Result;

use crate::app::AppContext;

/// Run `orbdeck mcp` until the client disconnects.
///
/// # Errors
///
/// Returns an error if the MCP transport fails.
pub async fn run(app: &AppContext) -> Result<()> {
    crate::mcp::serve(&app.config).await
}
