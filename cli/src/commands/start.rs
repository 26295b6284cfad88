//! `orbdeck start <name>|--all` — start stopped machines.

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::ToggleArgs;
use crate::domain::transition::RequestedState;

/// Run `orbdeck start`.
///
/// A machine that is not `stopped` is left alone.
///
/// # Errors
///
/// Returns an error if the machine is unknown or `orbctl start` fails.
pub async fn run(app: &AppContext, args: &ToggleArgs) -> Result<()> {
    super::toggle(app, args, RequestedState::Running).await
}
