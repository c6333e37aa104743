use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

/// Arguments for `tmux_attach_info`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TmuxAttachInfoArgs {
    /// Agent name, short or fully qualified
    pub name: String,
}

/// Tool describing how to attach to an agent session
pub struct TmuxAttachInfoTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxAttachInfoTool<R> {
    /// Create a new attach-info tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

impl<R: CommandRunner> Tool for TmuxAttachInfoTool<R> {
    type Args = TmuxAttachInfoArgs;

    fn name() -> &'static str {
        "tmux_attach_info"
    }

    fn description() -> &'static str {
        "Get the command to attach to an agent session and the directory it is \
         currently working in."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self.orchestrator.attach_info(&args.name).await?;
        to_json(&response)
    }
}
