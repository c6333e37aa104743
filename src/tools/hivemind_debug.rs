use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

/// Arguments for `hivemind_debug` (none)
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct HivemindDebugArgs {}

/// Tool reporting tool availability and namespace state
pub struct HivemindDebugTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> HivemindDebugTool<R> {
    /// Create a new debug tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

impl<R: CommandRunner> Tool for HivemindDebugTool<R> {
    type Args = HivemindDebugArgs;

    fn name() -> &'static str {
        "hivemind_debug"
    }

    fn description() -> &'static str {
        "Report where tmux and git were found on PATH, the session prefix, the \
         project directory and how many agent sessions are live."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, _args: Self::Args) -> Result<Value> {
        let report = self.orchestrator.diagnostics().await;
        to_json(&report)
    }
}
