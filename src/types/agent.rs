//! Agent specification and session response types
//!
//! This module contains the declarative description of what to launch and the
//! structured results returned by orchestrator operations.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HiveError;

use super::identifiers::SessionId;

// ============================================================================
// Agent Specification
// ============================================================================

/// Supported agent programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AgentProgram {
    /// Aider, with optional model and `--yes`
    #[default]
    Aider,
    /// Claude Code CLI, with optional `--dangerously-skip-permissions`
    Claude,
    /// Aider driving a local Ollama model
    Ollama,
    /// Caller-supplied command line
    Custom,
}

impl AgentProgram {
    /// Wire name of the program kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aider => "aider",
            Self::Claude => "claude",
            Self::Ollama => "ollama",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for AgentProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentProgram {
    type Err = HiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aider" => Ok(Self::Aider),
            "claude" => Ok(Self::Claude),
            "ollama" => Ok(Self::Ollama),
            "custom" => Ok(Self::Custom),
            _ => Err(HiveError::unknown_program(s)),
        }
    }
}

/// Declarative description of an agent to launch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentSpec {
    /// Program kind
    pub program: AgentProgram,
    /// Model identifier, meaning depends on the program
    pub model: Option<String>,
    /// Command line for `AgentProgram::Custom`
    pub custom_command: Option<String>,
    /// Suppress interactive confirmation prompts
    pub auto_accept: bool,
    /// First input delivered once the program has warmed up
    pub initial_prompt: Option<String>,
}

impl AgentSpec {
    /// Spec for the given program with everything else unset
    #[must_use]
    pub fn new(program: AgentProgram) -> Self {
        Self {
            program,
            ..Default::default()
        }
    }

    /// Set the model
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the custom command
    #[must_use]
    pub fn custom_command(mut self, command: impl Into<String>) -> Self {
        self.custom_command = Some(command.into());
        self
    }

    /// Set the auto-accept flag
    #[must_use]
    pub const fn auto_accept(mut self, auto_accept: bool) -> Self {
        self.auto_accept = auto_accept;
        self
    }

    /// Set the initial prompt
    #[must_use]
    pub fn initial_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.initial_prompt = Some(prompt.into());
        self
    }
}

// ============================================================================
// SESSION RESPONSE TYPES
// ============================================================================

/// One live session as reported by the multiplexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Fully-qualified identifier
    pub name: SessionId,
    /// Identifier with the namespace prefix stripped
    pub short_name: String,
    /// TRUE if at least one client is attached
    pub attached: bool,
    /// Session start directory
    pub path: String,
    /// Creation time reported by the multiplexer
    pub created: Option<DateTime<Utc>>,
}

/// Response from `list_sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSessionsResponse {
    /// Matching sessions sorted by identifier
    pub sessions: Vec<SessionSummary>,
    /// Number of matching sessions
    pub count: usize,
}

/// Response from `spawn`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnResponse {
    /// Always true; failures are returned as errors
    pub success: bool,
    /// Fully-qualified identifier of the new session
    pub session_name: SessionId,
    /// Short name as displayed to users
    pub short_name: String,
    /// Program kind that was launched
    pub program: AgentProgram,
    /// Model, if one was requested
    pub model: Option<String>,
    /// Directory the session was rooted at (worktree path when isolated)
    pub working_dir: PathBuf,
    /// Whether a worktree was provisioned
    pub worktree: bool,
    /// Exact command line handed to the multiplexer
    pub command: String,
    /// Command a human runs to watch the agent
    pub attach_command: String,
    /// Whether an initial prompt was delivered after warm-up
    pub initial_prompt_sent: bool,
}

/// Response from `kill`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillResponse {
    /// Always true; failures are returned as errors
    pub success: bool,
    /// Identifier of the destroyed session
    pub killed: SessionId,
}

/// Response from `send`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    /// Always true; failures are returned as errors
    pub success: bool,
    /// Target session
    pub sent_to: SessionId,
    /// Preview of the text that was sent (first 100 chars)
    pub text: String,
}

/// Response from `read`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOutputResponse {
    /// Source session
    pub session: SessionId,
    /// Number of lines in `output`
    pub lines_captured: usize,
    /// Captured terminal text, trailing whitespace trimmed
    pub output: String,
}

/// Response from `attach_info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachInfo {
    /// Target session
    pub session: SessionId,
    /// Command to attach a terminal to the session
    pub attach_command: String,
    /// Current working path of the session's active pane
    pub working_directory: String,
}

/// Per-session outcome of a broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastDelivery {
    /// Target session
    pub session: SessionId,
    /// Whether the keystrokes were delivered
    pub success: bool,
    /// Verbatim error when delivery failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response from `broadcast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResponse {
    /// One entry per live session in the namespace
    pub deliveries: Vec<BroadcastDelivery>,
    /// Number of successful deliveries
    pub delivered: usize,
    /// Number of failed deliveries
    pub failed: usize,
}

/// Location of an external program on `PATH`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramLocation {
    /// Configured program name
    pub program: String,
    /// Resolved path, if found
    pub path: Option<PathBuf>,
}

/// Response from `diagnostics`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Namespace prefix in effect
    pub prefix: String,
    /// Default project directory
    pub project_dir: PathBuf,
    /// Multiplexer binary resolution
    pub multiplexer: ProgramLocation,
    /// Version-control binary resolution
    pub vcs: ProgramLocation,
    /// Live sessions in the namespace, `None` if listing failed
    pub live_sessions: Option<usize>,
    /// Listing failure, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_error: Option<String>,
}
