//! `orbdeck delete <name>...` — permanently delete machines.

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize as _;

use crate::app::AppContext;
use crate::application::services::machines;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Machines to delete
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Run `orbdeck delete`.
///
/// Asks for confirmation unless `--yes`, `CI` or `ORBDECK_YES` is set.
/// Without a terminal to ask on, `--yes` is required.
///
/// # Errors
///
/// Returns an error if confirmation is impossible, the prompt fails, or any
/// `orbctl delete` fails.
/// Machines before the failing one stay deleted.
pub async fn run(app: &AppContext, args: &DeleteArgs) -> Result<()> {
    if !app.non_interactive {
        anyhow::ensure!(
            app.can_prompt(),
            "refusing to delete without confirmation; re-run with --yes"
        );
        print_warning(app, &args.names);
        if !app.confirm("Continue?", false)? {
            app.output.info("Cancelled.");
            return Ok(());
        }
    }

    let mut deleted = Vec::with_capacity(args.names.len());
    for name in &args.names {
        machines::delete_machine(&app.controller, name).await?;
        deleted.push(name.clone());
    }
    app.renderer().render_deleted(&deleted)
}

fn print_warning(app: &AppContext, names: &[String]) {
    let ctx = &app.output;
    eprintln!();
    eprintln!(
        "  {}",
        "WARNING: This will PERMANENTLY DELETE ALL DATA in the following machines:"
            .style(ctx.styles.error)
    );
    for name in names {
        eprintln!("    • {name}");
    }
    eprintln!();
}
