use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

/// Arguments for `tmux_send`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TmuxSendArgs {
    /// Agent name, short or fully qualified
    pub name: String,
    /// Text typed into the session, literally
    pub text: String,
    /// Press Enter after the text
    #[serde(default = "default_true")]
    pub press_enter: bool,
}

const fn default_true() -> bool {
    true
}

/// Tool typing text into an agent session
pub struct TmuxSendTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxSendTool<R> {
    /// Create a new send tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

impl<R: CommandRunner> Tool for TmuxSendTool<R> {
    type Args = TmuxSendArgs;

    fn name() -> &'static str {
        "tmux_send"
    }

    fn description() -> &'static str {
        "Send text to an agent session as literal keystrokes, followed by Enter \
         unless press_enter is false."
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self
            .orchestrator
            .send(&args.name, &args.text, args.press_enter)
            .await?;
        to_json(&response)
    }
}
