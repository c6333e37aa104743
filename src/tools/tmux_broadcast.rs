use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

/// Arguments for `tmux_broadcast`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TmuxBroadcastArgs {
    /// Text typed into every agent session
    pub text: String,
    /// Press Enter after the text
    #[serde(default = "default_true")]
    pub press_enter: bool,
}

const fn default_true() -> bool {
    true
}

/// Tool sending the same text to every agent
pub struct TmuxBroadcastTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxBroadcastTool<R> {
    /// Create a new broadcast tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

impl<R: CommandRunner> Tool for TmuxBroadcastTool<R> {
    type Args = TmuxBroadcastArgs;

    fn name() -> &'static str {
        "tmux_broadcast"
    }

    fn description() -> &'static str {
        "Send text to every live agent session at once. Reports delivery per \
         session; one failed delivery does not stop the others."
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self
            .orchestrator
            .broadcast(&args.text, args.press_enter)
            .await?;
        to_json(&response)
    }
}
