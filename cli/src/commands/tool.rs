//! `orbdeck tool <name> --args <json>` — invoke an agent tool directly.
//!
//! Same validation, confirmation, and output as the MCP server, so a tool
//! call can be reproduced from a shell.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;

use crate::app::AppContext;
use crate::application::services::tools::{self, ToolKind, ToolReply};
use crate::domain::tool_args::{BaseArgs, CommandArgs, CreateArgs};

/// JSON arguments for a tool.
#[derive(Args)]
pub struct ToolArgs {
    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,
}

/// JSON arguments plus the confirmation flag.
#[derive(Args)]
pub struct ConfirmableArgs {
    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,

    /// Run without asking (the user already approved)
    #[arg(long)]
    pub confirmed: bool,
}

/// Tool subcommands.
#[derive(Subcommand)]
pub enum ToolCommand {
    /// `orbctl list` output
    MachineList,
    /// `orbctl info <machine_name>` output
    MachineInfo(ToolArgs),
    /// Run a command in a machine
    MachineExecuteCommand(ConfirmableArgs),
    /// Create a machine
    MachineCreate(ConfirmableArgs),
    /// Open an SSH terminal into a machine
    MachineOpen(ToolArgs),
}

impl ToolCommand {
    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::MachineList => ToolKind::MachineList,
            Self::MachineInfo(_) => ToolKind::MachineInfo,
            Self::MachineExecuteCommand(_) => ToolKind::MachineExecuteCommand,
            Self::MachineCreate(_) => ToolKind::MachineCreate,
            Self::MachineOpen(_) => ToolKind::MachineOpen,
        }
    }
}

/// Parse `--args` into a tool argument record.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object of the right shape.
pub fn parse_args<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("invalid --args JSON: {raw}"))
}

/// Run a tool subcommand.
///
/// # Errors
///
/// Returns an error if the arguments are invalid or the tool fails.
pub async fn run(app: &AppContext, cmd: ToolCommand) -> Result<()> {
    let kind = cmd.kind();
    let reply = match cmd {
        ToolCommand::MachineList => ToolReply::Done(tools::machine_list(&app.controller).await?),
        ToolCommand::MachineInfo(a) => {
            let args: BaseArgs = parse_args(&a.args)?;
            ToolReply::Done(tools::machine_info(&app.controller, &args).await?)
        }
        ToolCommand::MachineOpen(a) => {
            let args: BaseArgs = parse_args(&a.args)?;
            ToolReply::Done(tools::machine_open(&app.terminal, &args).await?)
        }
        ToolCommand::MachineExecuteCommand(a) => {
            let args: CommandArgs = parse_args(&a.args)?;
            let confirmed = pre_confirmed(app, kind, a.confirmed);
            let reply = tools::machine_execute_command(&app.controller, &args, confirmed).await?;
            if ask(app, &reply)? {
                tools::machine_execute_command(&app.controller, &args, true).await?
            } else {
                reply
            }
        }
        ToolCommand::MachineCreate(a) => {
            let args: CreateArgs = parse_args(&a.args)?;
            let confirmed = pre_confirmed(app, kind, a.confirmed);
            let reporter = app.reporter();
            let reply = tools::machine_create(&app.controller, &reporter, &args, confirmed).await?;
            if ask(app, &reply)? {
                tools::machine_create(&app.controller, &reporter, &args, true).await?
            } else {
                reply
            }
        }
    };
    app.renderer().render_tool_reply(kind.name(), &reply)
}

/// Whether the call may skip the confirmation step entirely.
fn pre_confirmed(app: &AppContext, kind: ToolKind, flag: bool) -> bool {
    flag || !kind.needs_confirmation() || !app.config.tools.require_confirmation
}

/// Put a pending confirmation to the user when a prompt is possible.
fn ask(app: &AppContext, reply: &ToolReply) -> Result<bool> {
    match reply {
        ToolReply::NeedsConfirmation(prompt) if app.can_prompt() => app.confirm(prompt, false),
        _ => Ok(false),
    }
}
