//! `orbdeck stop <name>|--all` — stop running machines, preserving data.

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::ToggleArgs;
use crate::domain::transition::RequestedState;

/// Run `orbdeck stop`.
///
/// # Errors
///
/// Returns an error if the machine is unknown or `orbctl stop` fails.
pub async fn run(app: &AppContext, args: &ToggleArgs) -> Result<()> {
    super::toggle(app, args, RequestedState::Stopped).await
}
