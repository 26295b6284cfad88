//! `orbctl create` argument builder.
//!
//! This is the only place the default architecture is applied.

use crate::domain::machine::{Architecture, DEFAULT_ARCHITECTURE, ORBCTL};
use crate::domain::tool_args::CreateArgs;

/// Build the argument vector for `orbctl create`.
///
/// Output order is fixed:
/// `create [-u <user>] -a <arch> <distro>[:<version>] <machine_name>`.
///
/// - `architecture` falls back to [`DEFAULT_ARCHITECTURE`] when unset or blank;
///   the `x86_64` alias is normalized to `amd64`.
/// - `-u` is present only for a non-blank user name.
/// - `:<version>` is appended only for a non-blank version.
/// - user name, version, and machine name are trimmed.
#[must_use]
pub fn build_create_command(args: &CreateArgs) -> Vec<String> {
    let mut argv = vec!["create".to_string()];

    if let Some(user) = non_blank(args.user_name.as_deref()) {
        argv.push("-u".to_string());
        argv.push(user.to_string());
    }

    argv.push("-a".to_string());
    argv.push(resolve_architecture(args.architecture.as_deref()));

    let image = match non_blank(args.version.as_deref()) {
        Some(version) => format!("{}:{version}", args.distro),
        None => args.distro.clone(),
    };
    argv.push(image);
    argv.push(args.machine_name.trim().to_string());
    argv
}

/// Render `orbctl <argv…>` as a single display line.
#[must_use]
pub fn command_line(argv: &[String]) -> String {
    std::iter::once(ORBCTL)
        .chain(argv.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_architecture(raw: Option<&str>) -> String {
    match non_blank(raw) {
        Some(arch) => arch
            .parse::<Architecture>()
            .map_or_else(|_| arch.to_string(), |a| a.value().to_string()),
        None => DEFAULT_ARCHITECTURE.value().to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
