//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Terminal launcher and agent tools for OrbStack machines
#[derive(Parser)]
#[command(
    name = "orbdeck",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List machines
    List,

    /// Show machine details
    Info(commands::MachineArg),

    /// Start a machine (or --all)
    Start(commands::ToggleArgs),

    /// Stop a machine (or --all)
    Stop(commands::ToggleArgs),

    /// Create a machine
    Create(commands::create::CreateCmdArgs),

    /// Permanently delete machines
    Delete(commands::delete::DeleteArgs),

    /// Run a command inside a machine
    Run(commands::run::RunArgs),

    /// Show machine logs
    Logs(commands::MachineArg),

    /// Open an SSH session in a terminal
    Ssh(commands::ssh::SshArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// List supported distros and architectures
    Distros,

    /// Invoke an agent tool directly
    #[command(subcommand)]
    Tool(commands::tool::ToolCommand),

    /// Serve the agent tools over MCP (stdio)
    Mcp,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::List => commands::list::run(&app).await,
            Command::Info(args) => commands::info::run(&app, &args).await,
            Command::Start(args) => commands::start::run(&app, &args).await,
            Command::Stop(args) => commands::stop::run(&app, &args).await,
            Command::Create(args) => commands::create::run(&app, &args).await,
            Command::Delete(args) => commands::delete::run(&app, &args).await,
            Command::Run(args) => commands::run::run(&app, &args).await,
            Command::Logs(args) => commands::logs::run(&app, &args).await,
            Command::Ssh(args) => commands::ssh::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd).await,
            Command::Distros => commands::distros::run(&app),
            Command::Tool(cmd) => commands::tool::run(&app, cmd).await,
            Command::Mcp => commands::mcp::run(&app).await,
            Command::Version => commands::version::run(&app),
        }
    }
}
