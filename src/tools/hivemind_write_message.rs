use std::path::PathBuf;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::coordination::CoordinationLog;
use crate::error::{HiveError, Result};
use crate::types::messages::NewMessage;

use super::tool::{Tool, to_json};

/// Arguments for `hivemind_write_message`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HivemindWriteMessageArgs {
    /// Project root (defaults to the configured project directory)
    #[serde(default)]
    pub project_dir: Option<PathBuf>,
    /// Who is writing, e.g. `CONDUCTOR`
    pub sender: String,
    /// Who should read it, e.g. `FORGE` or `ALL`
    pub recipient: String,
    /// `REQUEST` (default), `RESPONSE`, `ALERT`, `INFO` or any other tag
    #[serde(default)]
    pub message_type: Option<String>,
    /// One-line subject
    pub subject: String,
    /// Message text
    pub body: String,
}

/// Tool appending to the shared message log
pub struct HivemindWriteMessageTool {
    log: Arc<CoordinationLog>,
}

impl HivemindWriteMessageTool {
    /// Create a new write-message tool
    #[must_use]
    pub fn new(log: Arc<CoordinationLog>) -> Self {
        Self { log }
    }
}

impl Tool for HivemindWriteMessageTool {
    type Args = HivemindWriteMessageArgs;

    fn name() -> &'static str {
        "hivemind_write_message"
    }

    fn description() -> &'static str {
        "Post a message to the hivemind log. The entry is inserted at the top of \
         the ACTIVE section; the log is created if it does not exist yet."
    }

    fn open_world() -> bool {
        false
    }

    async fn execute(&self, args: Self::Args) -> Result<Value> {
        if args.sender.trim().is_empty() || args.recipient.trim().is_empty() {
            return Err(HiveError::invalid_arguments(
                "sender and recipient must not be empty",
            ));
        }

        let mut message = NewMessage::new(args.sender, args.recipient, args.subject, args.body);
        if let Some(message_type) = args.message_type.filter(|t| !t.trim().is_empty()) {
            message = message.with_type(message_type);
        }

        let record = self
            .log
            .append_message(args.project_dir.as_deref(), message)
            .await?;
        to_json(&record)
    }
}
