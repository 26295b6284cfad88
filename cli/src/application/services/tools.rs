//! Application service — agent-invokable machine tools.
//!
//! Shared by the `orbdeck tool …` subcommands and the MCP server, so both
//! surfaces validate, confirm, and interpret output identically.

use anyhow::Result;

use crate::application::ports::{
    MachineInspector, MachineLifecycle, MachineShell, OutputFormat, ProgressReporter,
    TerminalLauncher,
};
use crate::application::services::machines::{self, interpret_output};
use crate::domain::create::{build_create_command, command_line};
use crate::domain::tool_args::{BaseArgs, CommandArgs, CreateArgs};
use crate::domain::validate::{validate_base_args, validate_command_args, validate_create_args};

/// The agent tool surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    MachineList,
    MachineInfo,
    MachineExecuteCommand,
    MachineCreate,
    MachineOpen,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::MachineList,
        ToolKind::MachineInfo,
        ToolKind::MachineExecuteCommand,
        ToolKind::MachineCreate,
        ToolKind::MachineOpen,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MachineList => "machine_list",
            Self::MachineInfo => "machine_info",
            Self::MachineExecuteCommand => "machine_execute_command",
            Self::MachineCreate => "machine_create",
            Self::MachineOpen => "machine_open",
        }
    }

    /// Tools that change machines or run arbitrary commands ask first.
    #[must_use]
    pub fn needs_confirmation(self) -> bool {
        matches!(self, Self::MachineExecuteCommand | Self::MachineCreate)
    }
}

/// Result of a confirmable tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReply {
    /// The action ran; carries its output.
    Done(String),
    /// The action was not run; carries the prompt to show the user.
    NeedsConfirmation(String),
}

// ── Confirmation prompts ──────────────────────────────────────────────────────

/// Prompt shown before running a command in a machine.
#[must_use]
pub fn execute_confirmation(args: &CommandArgs) -> String {
    format!(
        "Run command \"{}\" in the machine \"{}\"?",
        args.command.join(" "),
        args.machine_name
    )
}

/// Prompt shown before creating a machine. Uses the exact command that would run.
#[must_use]
pub fn create_confirmation(args: &CreateArgs) -> String {
    format!(
        "Run command \"{}\"? This can take a few minutes to complete.",
        command_line(&build_create_command(args))
    )
}

// ── Tools ─────────────────────────────────────────────────────────────────────

/// `machine_list`: every machine OrbStack knows about, as `orbctl list` text.
///
/// # Errors
///
/// Returns an error if `orbctl` fails.
pub async fn machine_list(ctl: &impl MachineInspector) -> Result<String> {
    tracing::info!(tool = ToolKind::MachineList.name(), "tool invoked");
    let output = ctl.list(OutputFormat::Text).await?;
    Ok(interpret_output(&output)?)
}

/// `machine_info`: `orbctl info <name>` text.
///
/// # Errors
///
/// Returns a validation error for a missing name, or an error if `orbctl` fails.
pub async fn machine_info(ctl: &impl MachineInspector, args: &BaseArgs) -> Result<String> {
    validate_base_args(args)?;
    tracing::info!(
        tool = ToolKind::MachineInfo.name(),
        machine = %args.machine_name,
        "tool invoked"
    );
    let output = ctl.info(&args.machine_name, OutputFormat::Text).await?;
    Ok(interpret_output(&output)?)
}

/// `machine_execute_command`: run a command inside a machine.
///
/// A stopped machine is started by `orbctl` automatically. When
/// `confirmed` is false the validated prompt is returned instead.
///
/// # Errors
///
/// Returns a validation error, or an error if the command fails.
pub async fn machine_execute_command(
    ctl: &impl MachineShell,
    args: &CommandArgs,
    confirmed: bool,
) -> Result<ToolReply> {
    validate_command_args(args)?;
    if !confirmed {
        return Ok(ToolReply::NeedsConfirmation(execute_confirmation(args)));
    }
    tracing::info!(
        tool = ToolKind::MachineExecuteCommand.name(),
        machine = %args.machine_name,
        "tool invoked"
    );
    machines::run_command(ctl, args).await.map(ToolReply::Done)
}

/// `machine_create`: create a machine, waiting up to the creation timeout.
///
/// When `confirmed` is false the validated prompt is returned instead.
///
/// # Errors
///
/// Returns a validation error, or an error if creation fails or times out.
pub async fn machine_create(
    ctl: &impl MachineLifecycle,
    reporter: &impl ProgressReporter,
    args: &CreateArgs,
    confirmed: bool,
) -> Result<ToolReply> {
    validate_create_args(args)?;
    if !confirmed {
        return Ok(ToolReply::NeedsConfirmation(create_confirmation(args)));
    }
    tracing::info!(
        tool = ToolKind::MachineCreate.name(),
        machine = %args.machine_name,
        "tool invoked"
    );
    machines::create_machine(ctl, reporter, args)
        .await
        .map(ToolReply::Done)
}

/// `machine_open`: open a terminal with an SSH session into the machine.
///
/// Only for explicit "open"/"ssh into" requests; use
/// `machine_execute_command` to act inside a machine.
///
/// # Errors
///
/// Returns a validation error, or an error if the terminal cannot be launched.
pub async fn machine_open(term: &impl TerminalLauncher, args: &BaseArgs) -> Result<String> {
    validate_base_args(args)?;
    tracing::info!(
        tool = ToolKind::MachineOpen.name(),
        machine = %args.machine_name,
        "tool invoked"
    );
    let output = term.open_ssh(&args.machine_name).await?;
    interpret_output(&output)?;
    Ok(format!("{} successfully opened", args.machine_name))
}
