//! Machine snapshot types and the distro/architecture catalog.
//!
//! Everything here is read from `orbctl` JSON output. Nothing is persisted;
//! every view re-fetches a fresh snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Control binary invoked for every machine operation.
pub const ORBCTL: &str = "orbctl";

// ── Machine state ────────────────────────────────────────────────────────────

/// Observed machine state as reported by `orbctl`.
///
/// `orbctl` does not publish a closed set of states, so anything outside the
/// known three is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineState {
    Running,
    Stopped,
    Stopping,
    Other(String),
}

impl MachineState {
    /// Parse a raw state string. Matching is exact, like the control binary's output.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            "stopping" => Self::Stopping,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Stopping => "stopping",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for MachineState {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<MachineState> for String {
    fn from(state: MachineState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Snapshot records ─────────────────────────────────────────────────────────

/// Image descriptor of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineImage {
    pub distro: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub variant: String,
}

/// Per-machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub isolated: bool,
    #[serde(default)]
    pub default_username: String,
}

/// One entry of `orbctl list --format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: String,
    pub name: String,
    pub state: MachineState,
    pub image: MachineImage,
    #[serde(default)]
    pub config: MachineConfig,
    #[serde(default)]
    pub builtin: bool,
}

impl Machine {
    /// `ssh://` URL that opens a shell as the machine's default user.
    #[must_use]
    pub fn ssh_url(&self) -> String {
        format!("ssh://{}@{}@orb", self.config.default_username, self.name)
    }

    /// True when `key` names this machine by name or id.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.id == key
    }
}

/// Output of `orbctl info <name> --format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineInfo {
    pub record: Machine,
    pub disk_size: u64,
}

impl MachineInfo {
    /// Disk size in decimal megabytes with one decimal place, e.g. `"1536.0 MB"`.
    #[must_use]
    pub fn disk_size_display(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let mb = self.disk_size as f64 / 1000.0 / 1000.0;
        format!("{mb:.1} MB")
    }
}

/// Render a boolean the way the detail view shows it.
#[must_use]
pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

// ── Distro catalog ───────────────────────────────────────────────────────────

/// Linux distributions `orbctl create` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distro {
    Alma,
    Alpine,
    Arch,
    Centos,
    Debian,
    Devuan,
    Fedora,
    Gentoo,
    Kali,
    Nixos,
    Openeuler,
    Opensuse,
    Oracle,
    Rocky,
    Ubuntu,
    Void,
}

impl Distro {
    pub const ALL: [Distro; 16] = [
        Distro::Alma,
        Distro::Alpine,
        Distro::Arch,
        Distro::Centos,
        Distro::Debian,
        Distro::Devuan,
        Distro::Fedora,
        Distro::Gentoo,
        Distro::Kali,
        Distro::Nixos,
        Distro::Openeuler,
        Distro::Opensuse,
        Distro::Oracle,
        Distro::Rocky,
        Distro::Ubuntu,
        Distro::Void,
    ];

    /// Value passed on the `orbctl` command line.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Alma => "alma",
            Self::Alpine => "alpine",
            Self::Arch => "arch",
            Self::Centos => "centos",
            Self::Debian => "debian",
            Self::Devuan => "devuan",
            Self::Fedora => "fedora",
            Self::Gentoo => "gentoo",
            Self::Kali => "kali",
            Self::Nixos => "nixos",
            Self::Openeuler => "openeuler",
            Self::Opensuse => "opensuse",
            Self::Oracle => "oracle",
            Self::Rocky => "rocky",
            Self::Ubuntu => "ubuntu",
            Self::Void => "void",
        }
    }

    /// Human-facing name.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Alma => "AlmaLinux",
            Self::Alpine => "Alpine Linux",
            Self::Arch => "Arch Linux",
            Self::Centos => "CentOS",
            Self::Debian => "Debian",
            Self::Devuan => "Devuan",
            Self::Fedora => "Fedora",
            Self::Gentoo => "Gentoo",
            Self::Kali => "Kali Linux",
            Self::Nixos => "NixOS",
            Self::Openeuler => "openEuler",
            Self::Opensuse => "openSUSE",
            Self::Oracle => "Oracle Linux",
            Self::Rocky => "Rocky Linux",
            Self::Ubuntu => "Ubuntu",
            Self::Void => "Void Linux",
        }
    }

    /// Comma-separated list of every supported value.
    #[must_use]
    pub fn supported_list() -> String {
        Self::ALL.map(Distro::value).join(", ")
    }
}

impl FromStr for Distro {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.value() == s)
            .ok_or_else(|| format!("unknown distro '{s}'"))
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ── Architecture ─────────────────────────────────────────────────────────────

/// CPU architecture of a new machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Arm64,
    #[serde(alias = "x86_64")]
    Amd64,
}

/// Architecture used when a create request does not name one.
pub const DEFAULT_ARCHITECTURE: Architecture = Architecture::Arm64;

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::Arm64, Architecture::Amd64];

    /// Value passed to `orbctl create -a`.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::Amd64 => "amd64",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::Amd64 => "x86_64",
        }
    }
}

impl FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm64" => Ok(Self::Arm64),
            "amd64" | "x86_64" => Ok(Self::Amd64),
            other => Err(format!("unknown architecture '{other}'")),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
