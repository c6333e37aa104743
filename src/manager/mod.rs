//! Agent session management
//!
//! Provides `SessionOrchestrator` for spawning, inspecting, driving and
//! killing agent sessions that live in an external terminal multiplexer.
//!
//! # Module Structure
//!
//! - `orchestrator` - Core `SessionOrchestrator` with public API
//! - `helpers` - Pure helper functions for validation and previews

mod helpers;
mod orchestrator;

pub use orchestrator::{SessionOrchestrator, SpawnSessionRequest};
