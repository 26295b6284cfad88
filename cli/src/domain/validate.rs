//! Tool argument validation — no I/O, no async.
//!
//! Every check is fail-fast: the first violated rule is reported and nothing
//! else is examined.

use crate::domain::error::ValidationError;
use crate::domain::machine::{Architecture, Distro};
use crate::domain::tool_args::{BaseArgs, CommandArgs, CreateArgs};

/// Require a non-empty machine name.
///
/// # Errors
///
/// Returns [`ValidationError::MissingMachineName`] when the name is empty or
/// blank, or [`ValidationError::InvalidMachineName`] when it is not a name.
pub fn validate_base_args(args: &BaseArgs) -> Result<(), ValidationError> {
    validate_machine_name(&args.machine_name)
}

/// Check a machine name before it reaches any command line.
///
/// Names are `[A-Za-z0-9._-]+` and may not start with `-` or `.`, so a name
/// can never be read as a flag or carry shell syntax into a terminal.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_machine_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::MissingMachineName);
    }
    if !is_machine_name(name) {
        return Err(ValidationError::InvalidMachineName(name.to_string()));
    }
    Ok(())
}

/// Require a machine name and at least one command token.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_command_args(args: &CommandArgs) -> Result<(), ValidationError> {
    validate_machine_name(&args.machine_name)?;
    if args.command.is_empty() {
        return Err(ValidationError::MissingCommand);
    }
    Ok(())
}

/// Validate a create request.
///
/// Rules, in order: name present, no underscore in name, name charset, distro supported,
/// architecture (if set) one of `arm64` / `amd64` / `x86_64`, user name and
/// version (if set) not blank.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_create_args(args: &CreateArgs) -> Result<(), ValidationError> {
    if is_blank(&args.machine_name) {
        return Err(ValidationError::MissingMachineName);
    }

    if args.machine_name.contains('_') {
        return Err(ValidationError::UnderscoreInName);
    }

    validate_machine_name(&args.machine_name)?;

    if args.distro.parse::<Distro>().is_err() {
        return Err(ValidationError::UnsupportedDistro {
            distro: args.distro.clone(),
            supported: Distro::supported_list(),
        });
    }

    if let Some(arch) = &args.architecture
        && arch.parse::<Architecture>().is_err()
    {
        return Err(ValidationError::UnsupportedArchitecture(arch.clone()));
    }

    if args.user_name.as_deref().is_some_and(is_blank) {
        return Err(ValidationError::BlankUserName);
    }

    if args.version.as_deref().is_some_and(is_blank) {
        return Err(ValidationError::BlankVersion);
    }

    Ok(())
}

fn is_machine_name(name: &str) -> bool {
    !name.starts_with(['-', '.'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
