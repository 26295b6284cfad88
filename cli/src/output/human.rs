//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::{OwoColorize as _, Style};

use crate::application::services::machines::TransitionOutcome;
use crate::application::services::tools::ToolReply;
use crate::domain::config::OrbdeckConfig;
use crate::domain::machine::{Architecture, Distro, Machine, MachineInfo, MachineState, yes_no};
use crate::domain::transition::RequestedState;
use crate::output::{OutputContext, Styles};

/// Colour family for a machine state glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Yellow,
    Gray,
}

impl Tone {
    fn style(self, styles: &Styles) -> Style {
        match self {
            Self::Green => styles.success,
            Self::Red => styles.error,
            Self::Yellow => styles.warning,
            Self::Gray => styles.unknown,
        }
    }
}

/// Glyph and tone for a state in the machine list. Case-insensitive.
#[must_use]
pub fn state_icon(state: &MachineState) -> (&'static str, Tone) {
    match state.as_str().to_ascii_lowercase().as_str() {
        "running" => ("●", Tone::Green),
        "stopped" => ("■", Tone::Red),
        "paused" => ("‖", Tone::Yellow),
        _ => ("?", Tone::Gray),
    }
}

/// Label/value rows of the detail view, in display order.
#[must_use]
pub fn info_rows(info: &MachineInfo) -> Vec<(&'static str, String)> {
    let record = &info.record;
    vec![
        ("State", record.state.to_string()),
        ("Distro", record.image.distro.clone()),
        ("Version", record.image.version.clone()),
        ("Architecture", record.image.arch.clone()),
        ("Default Username", record.config.default_username.clone()),
        ("Isolated", yes_no(record.config.isolated).to_string()),
        ("Disk Size", info.disk_size_display()),
        ("Built-in", yes_no(record.builtin).to_string()),
    ]
}

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the machine table.
    pub fn render_machines(&self, machines: &[Machine]) {
        if machines.is_empty() {
            if !self.ctx.quiet {
                println!("No machines found. Create one: orbdeck create <name> --distro ubuntu");
            }
            return;
        }
        let width = machines
            .iter()
            .map(|m| m.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);
        println!(
            "    {:<width$}  {:<10} {:<10} {:<7} {}",
            "NAME".style(self.ctx.styles.dim),
            "DISTRO".style(self.ctx.styles.dim),
            "VERSION".style(self.ctx.styles.dim),
            "ARCH".style(self.ctx.styles.dim),
            "STATE".style(self.ctx.styles.dim),
        );
        for m in machines {
            let (glyph, tone) = state_icon(&m.state);
            println!(
                "  {} {:<width$}  {:<10} {:<10} {:<7} {}",
                glyph.style(tone.style(&self.ctx.styles)),
                m.name,
                m.image.distro,
                m.image.version,
                m.image.arch,
                m.state,
            );
        }
    }

    /// Render the detail view of one machine.
    pub fn render_info(&self, info: &MachineInfo) {
        let (glyph, tone) = state_icon(&info.record.state);
        println!(
            "  {} {}",
            glyph.style(tone.style(&self.ctx.styles)),
            info.record.name.style(self.ctx.styles.header)
        );
        for (label, value) in info_rows(info) {
            println!("    {:<18} {value}", format!("{label}:").style(self.ctx.styles.dim));
        }
        println!(
            "    {:<18} {}",
            "SSH:".style(self.ctx.styles.dim),
            info.record.ssh_url()
        );
    }

    /// Render the result of a start/stop request.
    pub fn render_transition(&self, outcome: &TransitionOutcome) {
        match outcome {
            TransitionOutcome::Applied { machine, requested } => {
                self.ctx.success(&format!("{machine} is {}", past(*requested)));
            }
            TransitionOutcome::Skipped {
                machine,
                current,
                requested,
            } => {
                self.ctx.info(&format!(
                    "{machine} is {current}; nothing to do for {requested}"
                ));
            }
        }
    }

    /// Render a bulk start/stop.
    pub fn render_bulk(&self, requested: RequestedState) {
        self.ctx
            .success(&format!("All machines {}", past(requested)));
    }

    /// Print raw command output untouched.
    pub fn render_text(&self, text: &str) {
        if text.ends_with('\n') {
            print!("{text}");
        } else if !text.is_empty() {
            println!("{text}");
        }
    }

    pub fn render_created(&self, name: &str, output: &str) {
        self.render_text(output);
        self.ctx.success(&format!("Machine {name} is ready"));
        self.ctx.info(&format!("Open a shell: orbdeck ssh {name}"));
    }

    pub fn render_deleted(&self, names: &[String]) {
        for name in names {
            self.ctx.success(&format!("Deleted {name}"));
        }
    }

    pub fn render_ssh(&self, machine: &Machine, opened: bool) {
        self.ctx.kv("SSH:", &machine.ssh_url());
        if opened {
            self.ctx.success(&format!("{} successfully opened", machine.name));
        }
    }

    /// Render the distro and architecture catalog.
    pub fn render_distros(&self) {
        self.ctx.header("Distros:");
        for d in Distro::ALL {
            println!("    {:<12} {}", d.value(), d.title().style(self.ctx.styles.dim));
        }
        println!();
        self.ctx.header("Architectures:");
        for a in Architecture::ALL {
            println!("    {:<12} {}", a.value(), a.title().style(self.ctx.styles.dim));
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &OrbdeckConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<28} {}", "orbctl.path:", config.orbctl.path);
        println!("  {:<28} {}", "timeouts.command_secs:", config.timeouts.command_secs);
        println!("  {:<28} {}", "timeouts.create_secs:", config.timeouts.create_secs);
        println!(
            "  {:<28} {}",
            "tools.require_confirmation:", config.tools.require_confirmation
        );
        println!("  {:<28} {}", "terminal.app:", config.terminal.app);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["ORBDECK_CONFIG", "ORBDECK_ORBCTL", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render a tool result: output verbatim, or the confirmation prompt.
    pub fn render_tool_reply(&self, reply: &ToolReply) {
        match reply {
            ToolReply::Done(text) => self.render_text(text),
            ToolReply::NeedsConfirmation(prompt) => {
                self.ctx.warn(prompt);
                self.ctx.info("Re-run with --confirmed to proceed.");
            }
        }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("orbdeck {version}");
    }
}

fn past(requested: RequestedState) -> &'static str {
    match requested {
        RequestedState::Running => "running",
        RequestedState::Stopped => "stopped",
    }
}
