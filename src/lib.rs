//! # Hivemind Agents
//!
//! Orchestrates AI coding agents (aider, Claude Code, Ollama-backed aider, or
//! any command line) that each live in their own tmux session, and lets them
//! coordinate through two shared markdown documents: a status board and a
//! message log.
//!
//! ## Sessions
//!
//! [`SessionOrchestrator`] maps short agent names onto namespaced tmux
//! sessions, synthesizes the launch command, optionally isolates the agent in
//! a git worktree, and drives the session afterwards:
//!
//! ```no_run
//! # use hivemind_agents::{AgentProgram, AgentSpec, HiveConfig, SessionOrchestrator, SpawnSessionRequest};
//! # async fn example() -> hivemind_agents::Result<()> {
//! let orchestrator = SessionOrchestrator::new(HiveConfig::from_env());
//!
//! let spec = AgentSpec::new(AgentProgram::Aider)
//!     .model("gpt-4o")
//!     .auto_accept(true)
//!     .initial_prompt("Read .hivemind/MESSAGES.md and pick up your task");
//! let spawned = orchestrator
//!     .spawn(SpawnSessionRequest::new("forge", spec).worktree(None))
//!     .await?;
//! println!("attach with: {}", spawned.attach_command);
//!
//! let output = orchestrator.read_output("forge", Some(20)).await?;
//! println!("{}", output.output);
//!
//! orchestrator.kill("forge", false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The orchestrator keeps no session table of its own: tmux is the source of
//! truth and every call re-checks it.
//!
//! ## Coordination
//!
//! [`CoordinationLog`] reads `.hivemind/STATUS.md` and reads or appends to
//! `.hivemind/MESSAGES.md`, whose entries live under `## ACTIVE` (newest
//! first) until someone moves them to `## RESOLVED`:
//!
//! ```no_run
//! # use hivemind_agents::{CoordinationLog, MessageFilter, NewMessage};
//! # async fn example() -> hivemind_agents::Result<()> {
//! let log = CoordinationLog::new("/work/project");
//! log.append_message(None, NewMessage::new("CONDUCTOR", "FORGE", "Parser", "Build it"))
//!     .await?;
//!
//! let mine = MessageFilter { agent: Some("forge".into()), only_active: true };
//! println!("{}", log.read_messages(None, &mine).await?.content);
//! # Ok(())
//! # }
//! ```
//!
//! ## Tools
//!
//! [`HiveTools`] exposes every operation as a named JSON tool so a transport
//! (MCP, HTTP, a CLI) can mount them without knowing the types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod coordination;
pub mod error;
pub mod manager;
pub mod multiplexer;
pub mod process;
pub mod tools;
pub mod types;
pub mod workspace;

pub use coordination::CoordinationLog;
pub use error::{HiveError, Result};
pub use manager::{SessionOrchestrator, SpawnSessionRequest};
pub use multiplexer::Multiplexer;
pub use process::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use tools::{HiveTools, Tool, ToolDefinition};
pub use workspace::WorktreeProvisioner;

// Re-export type submodules for flat public API
pub use types::agent::{
    AgentProgram, AgentSpec, AttachInfo, BroadcastDelivery, BroadcastResponse,
    DiagnosticsReport, KillResponse, ListSessionsResponse, ProgramLocation, ReadOutputResponse,
    SendResponse, SessionSummary, SpawnResponse,
};
pub use types::identifiers::{SessionId, SessionNamespace};
pub use types::messages::{DocumentContent, MessageFilter, MessageRecord, MessageType, NewMessage};
pub use types::options::{HiveConfig, HiveConfigBuilder};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
