//! Argument records for the agent-invokable machine tools.
//!
//! Field doc comments double as the JSON schema descriptions an agent sees,
//! so they are written as instructions to the agent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments naming a single machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BaseArgs {
    /// REQUIRED. The name of the OrbStack machine, e.g. "alpine".
    /// If the user did not explicitly specify a machine name then ask them for it.
    #[serde(default)]
    pub machine_name: String,
}

/// Arguments for running a command inside a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CommandArgs {
    /// REQUIRED. The name of the OrbStack machine, e.g. "alpine".
    /// If the user did not explicitly specify a machine name then ask them for it.
    #[serde(default)]
    pub machine_name: String,

    /// REQUIRED. The command to run, one token per element, e.g. ["ls", "-l"].
    /// System commands usually require sudo, e.g. ["sudo", "apk", "add", "fish"].
    #[serde(default)]
    pub command: Vec<String>,
}

/// Arguments for creating a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateArgs {
    /// REQUIRED. The name of the new machine. If the user did not explicitly
    /// specify one then ask them for it. Names cannot contain underscores; use dashes.
    #[serde(default)]
    pub machine_name: String,

    /// REQUIRED. The Linux distro. If the user did not explicitly specify one then
    /// ask them. The only supported values are: alma, alpine, arch, centos, debian,
    /// devuan, fedora, gentoo, kali, nixos, openeuler, opensuse, oracle, rocky,
    /// ubuntu, void.
    #[serde(default)]
    pub distro: String,

    /// OPTIONAL. Distro version. Do not set this unless the user explicitly asked for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// OPTIONAL. Default username inside the machine. Do not set this unless the
    /// user explicitly asked for one; a default is used otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// OPTIONAL. CPU architecture: arm64 or x86_64. Defaults to arm64.
    /// Do not set this unless the user explicitly asked for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
}
