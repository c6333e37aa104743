//! Session orchestrator implementation
//!
//! This module is organized into logical submodules:
//! - `core`: Core struct and constructors
//! - `spawn`: Session spawning logic
//! - `list`: Session listing
//! - `info`: Output reads, attach details, diagnostics
//! - `interaction`: Sending input, broadcasting, and killing sessions

mod core;
mod info;
mod interaction;
mod list;
mod spawn;

pub use core::SessionOrchestrator;
pub use spawn::SpawnSessionRequest;
