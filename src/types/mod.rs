//! Type definitions for the hivemind orchestrator
//!
//! - [`identifiers`] - Session identifiers and namespace qualification
//! - [`agent`] - Agent specifications and session response types
//! - [`messages`] - Coordination message types
//! - [`options`] - Orchestrator configuration

pub mod agent;
pub mod identifiers;
pub mod messages;
pub mod options;

pub use agent::{
    AgentProgram, AgentSpec, AttachInfo, BroadcastDelivery, BroadcastResponse,
    DiagnosticsReport, KillResponse, ListSessionsResponse, ProgramLocation, ReadOutputResponse,
    SendResponse, SessionSummary, SpawnResponse,
};
pub use identifiers::{SessionId, SessionNamespace};
pub use messages::{DocumentContent, MessageFilter, MessageRecord, MessageType, NewMessage};
pub use options::{HiveConfig, HiveConfigBuilder};
