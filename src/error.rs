//! Error types for the hivemind agent orchestrator

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for session orchestration and coordination operations
#[derive(Error, Debug)]
pub enum HiveError {
    /// A session with this identifier is already live in the multiplexer
    #[error("Session '{0}' already exists")]
    SessionAlreadyExists(String),

    /// No live session with this identifier
    #[error("Session '{0}' does not exist")]
    SessionNotFound(String),

    /// The multiplexer reported a failure; the diagnostic is carried verbatim
    #[error("{operation} failed: {diagnostic}")]
    Gateway {
        /// Multiplexer subcommand that failed
        operation: String,
        /// Standard error of the external tool
        diagnostic: String,
    },

    /// The isolated working copy could not be created
    #[error("Failed to create worktree at {}: {diagnostic}", path.display())]
    WorkspaceProvision {
        /// Target worktree path
        path: PathBuf,
        /// Diagnostic text from the version-control tool
        diagnostic: String,
    },

    /// Program kind `custom` was requested without a command
    #[error("custom_command required when program=custom")]
    MissingCustomCommand,

    /// Program kind outside the supported set
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    /// A coordination document is missing
    #[error("{name} not found at {}", path.display())]
    DocumentNotFound {
        /// Document file name (e.g. `STATUS.md`)
        name: String,
        /// Where the document was expected
        path: PathBuf,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External CLI not installed or not on `PATH`
    #[error("{0} not found on PATH")]
    CliNotFound(String),

    /// External call exceeded the configured bound
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Request arguments failed validation
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// JSON encode/decode error at the tool boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, HiveError>;

impl HiveError {
    /// Create a session already exists error
    pub fn session_already_exists(session: impl Into<String>) -> Self {
        Self::SessionAlreadyExists(session.into())
    }

    /// Create a session not found error
    pub fn session_not_found(session: impl Into<String>) -> Self {
        Self::SessionNotFound(session.into())
    }

    /// Create a gateway error from a failed multiplexer subcommand
    pub fn gateway(operation: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::Gateway {
            operation: operation.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Create a workspace provisioning error
    pub fn workspace_provision(path: impl Into<PathBuf>, diagnostic: impl Into<String>) -> Self {
        Self::WorkspaceProvision {
            path: path.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Create an unknown program error
    pub fn unknown_program(program: impl Into<String>) -> Self {
        Self::UnknownProgram(program.into())
    }

    /// Create a document not found error
    pub fn document_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::DocumentNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a CLI not found error
    pub fn cli_not_found(program: impl Into<String>) -> Self {
        Self::CliNotFound(program.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Stable machine-readable code for this error
    ///
    /// Tool payloads carry it next to the message so callers can tell which
    /// step of an operation failed.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionAlreadyExists(_) => "session_already_exists",
            Self::SessionNotFound(_) => "session_not_found",
            Self::Gateway { .. } => "gateway_error",
            Self::WorkspaceProvision { .. } => "workspace_provision_error",
            Self::MissingCustomCommand => "missing_custom_command",
            Self::UnknownProgram(_) => "unknown_program",
            Self::DocumentNotFound { .. } => "document_not_found",
            Self::Io(_) => "io_error",
            Self::CliNotFound(_) => "cli_not_found",
            Self::Timeout(_) => "timeout",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::Json(_) => "json_error",
        }
    }

    /// Follow-up hint for the caller, when there is an obvious one
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::SessionAlreadyExists(_) => {
                Some("Use tmux_kill first or choose a different name")
            }
            Self::SessionNotFound(_) => Some("Use tmux_list to see live sessions"),
            Self::DocumentNotFound { .. } => Some("Initialize hivemind with the project first"),
            Self::CliNotFound(_) => Some("Install the tool or adjust the configured program path"),
            _ => None,
        }
    }
}
