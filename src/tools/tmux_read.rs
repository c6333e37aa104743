use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

/// Arguments for `tmux_read`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TmuxReadArgs {
    /// Agent name, short or fully qualified
    pub name: String,
    /// How many trailing lines to capture (default 50)
    #[serde(default)]
    pub lines: Option<usize>,
}

/// Tool reading recent terminal output of an agent
pub struct TmuxReadTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxReadTool<R> {
    /// Create a new read tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

impl<R: CommandRunner> Tool for TmuxReadTool<R> {
    type Args = TmuxReadArgs;

    fn name() -> &'static str {
        "tmux_read"
    }

    fn description() -> &'static str {
        "Read the last N lines of an agent's terminal, including scrollback."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self.orchestrator.read_output(&args.name, args.lines).await?;
        to_json(&response)
    }
}
