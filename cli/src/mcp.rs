//! MCP tool server exposing the machine tools over stdio.
//!
//! Tools:
//!   - `machine_list`
//!   - `machine_info`
//!   - `machine_execute_command` (confirmable)
//!   - `machine_create` (confirmable)
//!   - `machine_open`
//!
//! A confirmable tool called without `"confirmed": true` runs nothing and
//! returns the question the agent must put to the user. Setting
//! `tools.require_confirmation: false` in the config turns that off.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::application::services::tools::{self, ToolKind, ToolReply};
use crate::domain::OrbdeckConfig;
use crate::domain::tool_args::{BaseArgs, CommandArgs, CreateArgs};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::orbctl::OrbctlController;
use crate::infra::terminal::OsascriptTerminal;
use crate::output::LogReporter;

// ===================================================================
// Input structs
// ===================================================================

/// Input for `machine_execute_command`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteInput {
    #[serde(flatten)]
    pub args: CommandArgs,
    /// Set to true only after the user has approved the exact command.
    #[serde(default)]
    pub confirmed: bool,
}

/// Input for `machine_create`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateInput {
    #[serde(flatten)]
    pub args: CreateArgs,
    /// Set to true only after the user has approved the exact command.
    #[serde(default)]
    pub confirmed: bool,
}

// ===================================================================
// OrbdeckTools — the MCP server handler
// ===================================================================

/// MCP server handler exposing the machine tools to an agent.
#[derive(Clone)]
pub struct OrbdeckTools {
    controller: Arc<OrbctlController<TokioCommandRunner>>,
    terminal: Arc<OsascriptTerminal<TokioCommandRunner>>,
    require_confirmation: bool,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for OrbdeckTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbdeckTools")
            .field("orbctl", &self.controller.program())
            .field("require_confirmation", &self.require_confirmation)
            .finish_non_exhaustive()
    }
}

impl OrbdeckTools {
    /// Build the handler from configuration.
    #[must_use]
    pub fn from_config(config: &OrbdeckConfig) -> Self {
        let runner = TokioCommandRunner::new(std::time::Duration::from_secs(
            config.timeouts.command_secs,
        ));
        Self {
            controller: Arc::new(OrbctlController::from_config(config)),
            terminal: Arc::new(OsascriptTerminal::new(config.terminal.app.clone(), runner)),
            require_confirmation: config.tools.require_confirmation,
            tool_router: Self::tool_router(),
        }
    }

    fn confirmed(&self, flag: bool) -> bool {
        flag || !self.require_confirmation
    }
}

/// Text handed back to the agent for a tool reply.
#[must_use]
pub fn reply_text(reply: ToolReply) -> String {
    match reply {
        ToolReply::Done(text) => text,
        ToolReply::NeedsConfirmation(prompt) => format!(
            "{prompt}\nNothing was run. Ask the user to confirm, then call this tool \
             again with \"confirmed\": true."
        ),
    }
}

fn agent_error(tool: ToolKind, err: &anyhow::Error) -> String {
    tracing::warn!(tool = tool.name(), error = %format!("{err:#}"), "tool failed");
    format!("{err:#}")
}

// -------------------------------------------------------------------
// Tool implementations
// -------------------------------------------------------------------

#[tool_router]
impl OrbdeckTools {
    #[tool(description = "Runs `orbctl list` and returns the output: every machine \
        currently installed in OrbStack.")]
    async fn machine_list(&self) -> Result<String, String> {
        tools::machine_list(self.controller.as_ref())
            .await
            .map_err(|e| agent_error(ToolKind::MachineList, &e))
    }

    #[tool(description = "Runs `orbctl info <name>` and returns the output. If you are \
        unsure which machine names are available, run machine_list first.")]
    async fn machine_info(&self, params: Parameters<BaseArgs>) -> Result<String, String> {
        tools::machine_info(self.controller.as_ref(), &params.0)
            .await
            .map_err(|e| agent_error(ToolKind::MachineInfo, &e))
    }

    #[tool(description = "Runs `orbctl run -m <name> <command>` and returns the output. \
        If you are unsure which machine names are available, run machine_list first. \
        It is OK to send a command to a stopped machine; OrbStack starts it automatically.")]
    async fn machine_execute_command(
        &self,
        params: Parameters<ExecuteInput>,
    ) -> Result<String, String> {
        let input = params.0;
        tools::machine_execute_command(
            self.controller.as_ref(),
            &input.args,
            self.confirmed(input.confirmed),
        )
        .await
        .map(reply_text)
        .map_err(|e| agent_error(ToolKind::MachineExecuteCommand, &e))
    }

    #[tool(description = "Runs `orbctl create [-u <user_name>] -a <arch> \
        <distro>[:<version>] <machine_name>` and returns the output. If the user did not \
        specify a distro or machine name, you NEED TO ASK them for both. \
        This can take a few minutes.")]
    async fn machine_create(&self, params: Parameters<CreateInput>) -> Result<String, String> {
        let input = params.0;
        tools::machine_create(
            self.controller.as_ref(),
            &LogReporter,
            &input.args,
            self.confirmed(input.confirmed),
        )
        .await
        .map(reply_text)
        .map_err(|e| agent_error(ToolKind::MachineCreate, &e))
    }

    #[tool(description = "Opens a terminal with an SSH session into the machine. DO NOT \
        call this unless the user EXPLICITLY asks to open or ssh into a machine. To run \
        commands or perform actions, use machine_execute_command instead.")]
    async fn machine_open(&self, params: Parameters<BaseArgs>) -> Result<String, String> {
        tools::machine_open(self.terminal.as_ref(), &params.0)
            .await
            .map_err(|e| agent_error(ToolKind::MachineOpen, &e))
    }
}

// -------------------------------------------------------------------
// ServerHandler implementation (via tool_handler macro)
// -------------------------------------------------------------------

#[tool_handler]
impl ServerHandler for OrbdeckTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(instructions(self.require_confirmation)),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Server instructions listing the tools and the confirmation rule.
#[must_use]
pub fn instructions(require_confirmation: bool) -> String {
    let names: Vec<&str> = ToolKind::ALL.iter().map(|k| k.name()).collect();
    let mut text = format!(
        "OrbStack machine tools: {}. Machine names come from machine_list.",
        names.join(", ")
    );
    if require_confirmation {
        let gated: Vec<&str> = ToolKind::ALL
            .iter()
            .filter(|k| k.needs_confirmation())
            .map(|k| k.name())
            .collect();
        text.push_str(&format!(
            " {} return a question for the user unless called with \"confirmed\": true.",
            gated.join(" and ")
        ));
    }
    text
}

/// Serve the tools on stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the transport fails to start or terminates abnormally.
pub async fn serve(config: &OrbdeckConfig) -> Result<()> {
    let tools = OrbdeckTools::from_config(config);
    tracing::info!(?tools, "starting MCP stdio server");
    let service = tools
        .serve(rmcp::transport::stdio())
        .await
        .context("starting MCP server")?;
    service.waiting().await.context("MCP server error")?;
    tracing::info!("MCP client disconnected");
    Ok(())
}
