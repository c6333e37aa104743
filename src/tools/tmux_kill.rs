use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

/// Arguments for `tmux_kill`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TmuxKillArgs {
    /// Agent name, short or fully qualified
    pub name: String,
    /// Kill without a graceful stop
    #[serde(default)]
    pub force: bool,
}

/// Tool terminating an agent session
pub struct TmuxKillTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxKillTool<R> {
    /// Create a new kill tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

impl<R: CommandRunner> Tool for TmuxKillTool<R> {
    type Args = TmuxKillArgs;

    fn name() -> &'static str {
        "tmux_kill"
    }

    fn description() -> &'static str {
        "Kill an agent's tmux session. Fails if the session does not exist."
    }

    fn destructive() -> bool {
        true
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self.orchestrator.kill(&args.name, args.force).await?;
        to_json(&response)
    }
}
