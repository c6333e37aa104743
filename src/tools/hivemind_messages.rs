use std::path::PathBuf;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::coordination::CoordinationLog;
use crate::error::Result;
use crate::types::messages::MessageFilter;

use super::tool::{Tool, to_json};

/// Arguments for `hivemind_messages`
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HivemindMessagesArgs {
    /// Project root (defaults to the configured project directory)
    pub project_dir: Option<PathBuf>,
    /// Only messages from, to, or broadcast to this agent
    pub filter_agent: Option<String>,
    /// Only the ACTIVE section
    pub only_active: bool,
}

/// Tool reading the shared message log
pub struct HivemindMessagesTool {
    log: Arc<CoordinationLog>,
}

impl HivemindMessagesTool {
    /// Create a new messages tool
    #[must_use]
    pub fn new(log: Arc<CoordinationLog>) -> Self {
        Self { log }
    }
}

impl Tool for HivemindMessagesTool {
    type Args = HivemindMessagesArgs;

    fn name() -> &'static str {
        "hivemind_messages"
    }

    fn description() -> &'static str {
        "Read the hivemind message log (.hivemind/MESSAGES.md), optionally only \
         the ACTIVE section and/or only messages involving one agent."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    fn open_world() -> bool {
        false
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        let filter = MessageFilter {
            agent: args.filter_agent.filter(|a| !a.trim().is_empty()),
            only_active: args.only_active,
        };
        let document = self
            .log
            .read_messages(args.project_dir.as_deref(), &filter)
            .await?;
        to_json(&document)
    }
}
