use std::path::PathBuf;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::coordination::CoordinationLog;
use crate::error::Result;

use super::tool::{Tool, to_json};

/// Arguments for `hivemind_status`
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HivemindStatusArgs {
    /// Project root (defaults to the configured project directory)
    pub project_dir: Option<PathBuf>,
}

/// Tool reading the shared status board
pub struct HivemindStatusTool {
    log: Arc<CoordinationLog>,
}

impl HivemindStatusTool {
    /// Create a new status tool
    #[must_use]
    pub fn new(log: Arc<CoordinationLog>) -> Self {
        Self { log }
    }
}

impl Tool for HivemindStatusTool {
    type Args = HivemindStatusArgs;

    fn name() -> &'static str {
        "hivemind_status"
    }

    fn description() -> &'static str {
        "Read the hivemind status board (.hivemind/STATUS.md) of a project."
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
        let document = self.log.read_status(args.project_dir.as_deref()).await?;
        to_json(&document)
    }
}
