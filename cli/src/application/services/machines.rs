//! Application service — machine listing, inspection, and lifecycle.
//!
//! Every call re-queries `orbctl`; nothing is cached between calls.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{
    MachineController, MachineInspector, MachineLifecycle, MachineShell, OutputFormat,
    ProgressReporter,
};
use crate::domain::create::{build_create_command, command_line};
use crate::domain::error::{CommandError, MachineError};
use crate::domain::interpret::{interpret_exit, parse_machine_info, parse_machine_list};
use crate::domain::machine::{Machine, MachineInfo, MachineState};
use crate::domain::tool_args::{CommandArgs, CreateArgs};
use crate::domain::transition::{RequestedState, StateTransition, TransitionFlow};
use crate::domain::validate::{validate_command_args, validate_create_args, validate_machine_name};

/// Outcome of a single start/stop request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The guard approved and `orbctl` completed the command.
    Applied {
        machine: String,
        requested: RequestedState,
    },
    /// The guard declined: the machine is already there, or in a state
    /// (`stopping`, unknown) that has no transition.
    Skipped {
        machine: String,
        current: MachineState,
        requested: RequestedState,
    },
}

/// Apply the stdout/stderr/exit rules to a finished process.
///
/// # Errors
///
/// Returns a [`CommandError`] when the call failed.
pub fn interpret_output(output: &Output) -> Result<String, CommandError> {
    interpret_exit(
        output.status.success(),
        output.status.code(),
        &String::from_utf8_lossy(&output.stdout),
        &String::from_utf8_lossy(&output.stderr),
    )
}

/// List machines.
///
/// Malformed JSON is reported through `reporter` and yields an empty list.
///
/// # Errors
///
/// Returns an error if `orbctl` cannot be run or reports failure.
pub async fn list_machines(
    ctl: &impl MachineInspector,
    reporter: &impl ProgressReporter,
) -> Result<Vec<Machine>> {
    let output = ctl.list(OutputFormat::Json).await?;
    let stdout = interpret_output(&output).context("Machine List")?;
    match parse_machine_list(&stdout) {
        Ok(machines) => {
            tracing::debug!(count = machines.len(), "machine list fetched");
            Ok(machines)
        }
        Err(e) => {
            tracing::warn!(error = %e, "discarding unparseable machine list");
            reporter.warn("Failed to parse machine list");
            Ok(Vec::new())
        }
    }
}

/// Fetch detail for one machine.
///
/// Malformed JSON is reported through `reporter` and yields `None`.
///
/// # Errors
///
/// Returns an error if `orbctl` cannot be run or reports failure.
pub async fn machine_info(
    ctl: &impl MachineInspector,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<Option<MachineInfo>> {
    validate_machine_name(name)?;
    let output = ctl.info(name, OutputFormat::Json).await?;
    let stdout = interpret_output(&output).context("Machine Info")?;
    match parse_machine_info(&stdout) {
        Ok(info) => Ok(Some(info)),
        Err(e) => {
            tracing::warn!(error = %e, machine = name, "discarding unparseable machine info");
            reporter.warn("Failed to parse machine info");
            Ok(None)
        }
    }
}

/// Find a machine by name or id in a fresh listing.
///
/// # Errors
///
/// Returns [`MachineError::NotFound`] when no machine matches.
pub async fn find_machine(
    ctl: &impl MachineInspector,
    reporter: &impl ProgressReporter,
    key: &str,
) -> Result<Machine> {
    list_machines(ctl, reporter)
        .await?
        .into_iter()
        .find(|m| m.matches(key))
        .ok_or_else(|| MachineError::NotFound(key.to_string()).into())
}

/// Move a machine toward `requested`, issuing a command only when the guard approves.
///
/// The machine's current state is read from a fresh listing, so a stale
/// request can never fire a redundant command.
///
/// # Errors
///
/// Returns an error if the machine is unknown or the command fails.
pub async fn transition_machine(
    ctl: &impl MachineController,
    reporter: &impl ProgressReporter,
    key: &str,
    requested: RequestedState,
) -> Result<TransitionOutcome> {
    let machine = find_machine(ctl, reporter, key).await?;
    let mut flow = TransitionFlow::default();
    flow.request(StateTransition::for_machine(&machine, requested));

    let Some(decision) = flow.begin() else {
        anyhow::bail!("no transition queued for '{key}'");
    };
    if !decision.should_execute() {
        tracing::info!(
            machine = %machine.name,
            current = %machine.state,
            %requested,
            "transition skipped by guard"
        );
        return Ok(TransitionOutcome::Skipped {
            machine: machine.name,
            current: machine.state,
            requested,
        });
    }

    reporter.step(&format!("{} {}", verb(requested), machine.name));
    tracing::info!(command = ?decision.command(), "issuing transition");
    let result = ctl.transition(decision.command()).await;
    flow.finish();

    let output = result?;
    interpret_output(&output).context("State Transition")?;
    Ok(TransitionOutcome::Applied {
        machine: machine.name,
        requested,
    })
}

/// Start or stop every machine (`orbctl start --all` / `stop --all`).
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn toggle_all(
    ctl: &impl MachineLifecycle,
    reporter: &impl ProgressReporter,
    requested: RequestedState,
) -> Result<()> {
    reporter.step(&format!("{} all machines", verb(requested)));
    let output = match requested {
        RequestedState::Running => ctl.start_all().await?,
        RequestedState::Stopped => ctl.stop_all().await?,
    };
    interpret_output(&output).context("Toggle All Machines")?;
    Ok(())
}

/// Validate, build, and run `orbctl create`.
///
/// Returns the control binary's stdout.
///
/// # Errors
///
/// Returns a [`crate::domain::ValidationError`] before any process launch,
/// or an error if the command fails or times out.
pub async fn create_machine(
    ctl: &impl MachineLifecycle,
    reporter: &impl ProgressReporter,
    args: &CreateArgs,
) -> Result<String> {
    validate_create_args(args)?;
    let command = build_create_command(args);
    tracing::info!(command = %command_line(&command), "creating machine");
    reporter.step(&format!("Creating machine {}", args.machine_name));
    let output = ctl.create(&command).await?;
    let stdout = interpret_output(&output).context("Machine Creation Failed")?;
    reporter.success(&format!("Machine {} created", args.machine_name));
    Ok(stdout)
}

/// Permanently delete a machine and all its data.
///
/// # Errors
///
/// Returns a [`crate::domain::ValidationError`] for a malformed name, or an
/// error if the command fails.
pub async fn delete_machine(ctl: &impl MachineLifecycle, name: &str) -> Result<String> {
    validate_machine_name(name)?;
    tracing::info!(machine = name, "deleting machine");
    let output = ctl.delete(name).await?;
    interpret_output(&output).context("Delete Machine")
}

/// Run a command inside a machine and return its stdout.
///
/// # Errors
///
/// Returns a [`crate::domain::ValidationError`] before any process launch,
/// or an error if the command fails.
pub async fn run_command(ctl: &impl MachineShell, args: &CommandArgs) -> Result<String> {
    validate_command_args(args)?;
    tracing::info!(machine = %args.machine_name, command = ?args.command, "running command");
    let output = ctl.run_in(&args.machine_name, &args.command).await?;
    Ok(interpret_output(&output)?)
}

/// Raw text of `orbctl logs <name>`.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn machine_logs(ctl: &impl MachineInspector, name: &str) -> Result<String> {
    validate_machine_name(name)?;
    let output = ctl.logs(name).await?;
    interpret_output(&output).context("Logs")
}

/// Raw text of `orbctl config show`.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn orbctl_config(ctl: &impl MachineInspector) -> Result<String> {
    let output = ctl.config_show().await?;
    interpret_output(&output).context("Configuration")
}

fn verb(requested: RequestedState) -> &'static str {
    match requested {
        RequestedState::Running => "Starting",
        RequestedState::Stopped => "Stopping",
    }
}
