//! Tools exposing the orchestrator and coordination log to a transport
//!
//! Every callable operation is a [`Tool`]. [`HiveTools`] bundles one of each
//! and dispatches JSON calls by tool name, always answering with JSON: the
//! operation's response on success, or an error payload
//! `{ "error", "kind", "suggestion"? }` on failure.

mod hivemind_debug;
mod hivemind_messages;
mod hivemind_status;
mod hivemind_write_message;
mod tmux_attach_info;
mod tmux_broadcast;
mod tmux_kill;
mod tmux_list;
mod tmux_read;
mod tmux_send;
mod tmux_spawn;
mod tool;

use std::sync::Arc;

use serde_json::{Value, json};

use crate::coordination::CoordinationLog;
use crate::error::HiveError;
use crate::manager::SessionOrchestrator;
use crate::process::{CommandRunner, SystemRunner};
use crate::types::options::HiveConfig;

pub use hivemind_debug::{HivemindDebugArgs, HivemindDebugTool};
pub use hivemind_messages::{HivemindMessagesArgs, HivemindMessagesTool};
pub use hivemind_status::{HivemindStatusArgs, HivemindStatusTool};
pub use hivemind_write_message::{HivemindWriteMessageArgs, HivemindWriteMessageTool};
pub use tmux_attach_info::{TmuxAttachInfoArgs, TmuxAttachInfoTool};
pub use tmux_broadcast::{TmuxBroadcastArgs, TmuxBroadcastTool};
pub use tmux_kill::{TmuxKillArgs, TmuxKillTool};
pub use tmux_list::{TmuxListArgs, TmuxListTool};
pub use tmux_read::{TmuxReadArgs, TmuxReadTool};
pub use tmux_send::{TmuxSendArgs, TmuxSendTool};
pub use tmux_spawn::{TmuxSpawnArgs, TmuxSpawnTool};
pub use tool::{Tool, ToolDefinition};

use tool::invoke;

// ============================================================================
// TOOL SET
// ============================================================================

/// Every tool, sharing one orchestrator and one coordination log
pub struct HiveTools<R = SystemRunner> {
    list: TmuxListTool<R>,
    spawn: TmuxSpawnTool<R>,
    kill: TmuxKillTool<R>,
    send: TmuxSendTool<R>,
    read: TmuxReadTool<R>,
    attach_info: TmuxAttachInfoTool<R>,
    broadcast: TmuxBroadcastTool<R>,
    debug: HivemindDebugTool<R>,
    status: HivemindStatusTool,
    messages: HivemindMessagesTool,
    write_message: HivemindWriteMessageTool,
}

impl HiveTools<SystemRunner> {
    /// Tool set running real `tmux` and `git` processes
    #[must_use]
    pub fn from_config(config: HiveConfig) -> Self {
        let log = CoordinationLog::from_config(&config);
        Self::new(Arc::new(SessionOrchestrator::new(config)), Arc::new(log))
    }
}

impl<R: CommandRunner> HiveTools<R> {
    /// Tool set over an existing orchestrator and coordination log
    #[must_use]
    pub fn new(orchestrator: Arc<SessionOrchestrator<R>>, log: Arc<CoordinationLog>) -> Self {
        Self {
            list: TmuxListTool::new(Arc::clone(&orchestrator)),
            spawn: TmuxSpawnTool::new(Arc::clone(&orchestrator)),
            kill: TmuxKillTool::new(Arc::clone(&orchestrator)),
            send: TmuxSendTool::new(Arc::clone(&orchestrator)),
            read: TmuxReadTool::new(Arc::clone(&orchestrator)),
            attach_info: TmuxAttachInfoTool::new(Arc::clone(&orchestrator)),
            broadcast: TmuxBroadcastTool::new(Arc::clone(&orchestrator)),
            debug: HivemindDebugTool::new(orchestrator),
            status: HivemindStatusTool::new(Arc::clone(&log)),
            messages: HivemindMessagesTool::new(Arc::clone(&log)),
            write_message: HivemindWriteMessageTool::new(log),
        }
    }

    /// Definitions of every tool, for a transport to advertise
    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::of::<TmuxListTool<R>>(),
            ToolDefinition::of::<TmuxSpawnTool<R>>(),
            ToolDefinition::of::<TmuxKillTool<R>>(),
            ToolDefinition::of::<TmuxSendTool<R>>(),
            ToolDefinition::of::<TmuxReadTool<R>>(),
            ToolDefinition::of::<TmuxAttachInfoTool<R>>(),
            ToolDefinition::of::<TmuxBroadcastTool<R>>(),
            ToolDefinition::of::<HivemindStatusTool>(),
            ToolDefinition::of::<HivemindMessagesTool>(),
            ToolDefinition::of::<HivemindWriteMessageTool>(),
            ToolDefinition::of::<HivemindDebugTool<R>>(),
        ]
    }

    /// Run the tool called `name` with JSON `args`
    ///
    /// Never fails: errors come back as an error payload.
    pub async fn call(&self, name: &str, args: Value) -> Value {
        let result = match name {
            "tmux_list" => invoke(&self.list, args).await,
            "tmux_spawn" => invoke(&self.spawn, args).await,
            "tmux_kill" => invoke(&self.kill, args).await,
            "tmux_send" => invoke(&self.send, args).await,
            "tmux_read" => invoke(&self.read, args).await,
            "tmux_attach_info" => invoke(&self.attach_info, args).await,
            "tmux_broadcast" => invoke(&self.broadcast, args).await,
            "hivemind_status" => invoke(&self.status, args).await,
            "hivemind_messages" => invoke(&self.messages, args).await,
            "hivemind_write_message" => invoke(&self.write_message, args).await,
            "hivemind_debug" => invoke(&self.debug, args).await,
            unknown => Err(HiveError::invalid_arguments(format!("unknown tool '{unknown}'"))),
        };

        result.unwrap_or_else(|e| {
            log::debug!("Tool {name} failed: {e}");
            error_payload(&e)
        })
    }
}

/// Structured failure answer
#[must_use]
pub fn error_payload(error: &HiveError) -> Value {
    let mut payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    if let Some(suggestion) = error.suggestion() {
        payload["suggestion"] = Value::from(suggestion);
    }
    payload
}
