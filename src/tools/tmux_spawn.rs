use std::path::PathBuf;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::{SessionOrchestrator, SpawnSessionRequest};
use crate::process::{CommandRunner, SystemRunner};
use crate::types::agent::{AgentProgram, AgentSpec};

use super::tool::{Tool, to_json};

// ============================================================================
// ARGS
// ============================================================================

/// Arguments for `tmux_spawn`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TmuxSpawnArgs {
    /// Short agent name, e.g. `forge`
    pub name: String,
    /// `aider`, `claude`, `ollama` or `custom`
    #[serde(default = "default_program")]
    pub program: String,
    /// Model passed to the agent program
    #[serde(default)]
    pub model: Option<String>,
    /// Directory the session starts in (defaults to the project directory)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Text typed into the agent once it has started
    #[serde(default)]
    pub initial_prompt: Option<String>,
    /// Let the agent act without confirmation prompts
    #[serde(default = "default_true")]
    pub auto_accept: bool,
    /// Full command line, required when `program` is `custom`
    #[serde(default)]
    pub custom_command: Option<String>,
    /// Run the agent in its own git worktree
    #[serde(default)]
    pub use_worktree: bool,
    /// Worktree branch (defaults to the agent name)
    #[serde(default)]
    pub branch_name: Option<String>,
}

fn default_program() -> String {
    AgentProgram::default().as_str().to_string()
}

const fn default_true() -> bool {
    true
}

impl TmuxSpawnArgs {
    fn into_request(self) -> Result<SpawnSessionRequest> {
        let program: AgentProgram = self.program.parse()?;

        let mut spec = AgentSpec::new(program).auto_accept(self.auto_accept);
        if let Some(model) = self.model {
            spec = spec.model(model);
        }
        if let Some(command) = self.custom_command {
            spec = spec.custom_command(command);
        }
        if let Some(prompt) = self.initial_prompt {
            spec = spec.initial_prompt(prompt);
        }

        let mut request = SpawnSessionRequest::new(self.name, spec);
        if let Some(dir) = self.working_dir {
            request = request.working_dir(dir);
        }
        if self.use_worktree {
            request = request.worktree(self.branch_name);
        }
        Ok(request)
    }
}

// ============================================================================
// TOOL STRUCT
// ============================================================================

/// Tool spawning a new agent session
pub struct TmuxSpawnTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxSpawnTool<R> {
    /// Create a new spawn tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

// ============================================================================
// TOOL TRAIT IMPLEMENTATION
// ============================================================================

impl<R: CommandRunner> Tool for TmuxSpawnTool<R> {
    type Args = TmuxSpawnArgs;

    fn name() -> &'static str {
        "tmux_spawn"
    }

    fn description() -> &'static str {
        "Spawn an AI agent (aider, claude, ollama or a custom command) in a new \
         detached tmux session, optionally inside its own git worktree. \
         Returns the session name, the launch command and how to attach."
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self.orchestrator.spawn(args.into_request()?).await?;
        to_json(&response)
    }
}
