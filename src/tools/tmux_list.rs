use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};

use super::tool::{Tool, to_json};

// ============================================================================
// ARGS
// ============================================================================

/// Arguments for `tmux_list`
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TmuxListArgs {
    /// Only list sessions whose name starts with this prefix
    /// (defaults to the configured namespace prefix)
    pub filter_prefix: Option<String>,
}

// ============================================================================
// TOOL STRUCT
// ============================================================================

/// Tool listing live agent sessions
pub struct TmuxListTool<R = SystemRunner> {
    orchestrator: Arc<SessionOrchestrator<R>>,
}

impl<R> TmuxListTool<R> {
    /// Create a new list tool
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>) -> Self {
        Self { orchestrator }
    }
}

// ============================================================================
// TOOL TRAIT IMPLEMENTATION
// ============================================================================

impl<R: CommandRunner> Tool for TmuxListTool<R> {
    type Args = TmuxListArgs;

    fn name() -> &'static str {
        "tmux_list"
    }

    fn description() -> &'static str {
        "List live agent sessions with attach state, working directory and \
         creation time. An idle multiplexer server yields an empty list."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let response = self
            .orchestrator
            .list_sessions(args.filter_prefix.as_deref())
            .await?;
        to_json(&response)
    }
}
