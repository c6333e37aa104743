//! Multiplexer gateway
//!
//! Thin adapter over the tmux command protocol. Every method is one (or, for
//! `send_input` with Enter, two) subprocess calls; exit codes and stderr are
//! translated into [`HiveError`] variants and nothing is cached or retried.
//! Session state always comes from the live multiplexer.

mod format;

use std::path::Path;

use crate::error::{HiveError, Result};
use crate::process::{CommandOutput, CommandRunner, Invocation};
use crate::types::agent::SessionSummary;
use crate::types::identifiers::{SessionId, SessionNamespace};

use format::{
    DESCRIBE_FORMAT, LIST_FORMAT, is_duplicate_session, is_empty_server, pane_target,
    parse_describe, parse_session_line, session_target, tail_lines,
};

/// Gateway to the external terminal multiplexer
#[derive(Debug, Clone)]
pub struct Multiplexer<R> {
    runner: R,
    program: String,
    namespace: SessionNamespace,
}

impl<R: CommandRunner> Multiplexer<R> {
    /// Create a gateway issuing `program` subcommands through `runner`
    pub fn new(runner: R, program: impl Into<String>, namespace: SessionNamespace) -> Self {
        Self {
            runner,
            program: program.into(),
            namespace,
        }
    }

    /// Namespace used for listing defaults and short names
    #[must_use]
    pub fn namespace(&self) -> &SessionNamespace {
        &self.namespace
    }

    /// Configured multiplexer program
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command a human runs to attach to `id`
    #[must_use]
    pub fn attach_command(&self, id: &SessionId) -> String {
        format!("{} attach -t {id}", self.program)
    }

    async fn exec<I, S>(&self, args: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(&self.program).args(args);
        self.runner.run(&invocation).await
    }

    async fn require(&self, id: &SessionId) -> Result<()> {
        if self.exists(id).await? {
            Ok(())
        } else {
            Err(HiveError::session_not_found(id.as_str()))
        }
    }

    /// TRUE iff a live session has exactly this identifier
    ///
    /// # Errors
    /// Returns error only if the multiplexer cannot be invoked at all
    pub async fn exists(&self, id: &SessionId) -> Result<bool> {
        let output = self
            .exec(["has-session".to_string(), "-t".to_string(), session_target(id)])
            .await?;
        Ok(output.success())
    }

    /// Create a detached session running `command` rooted at `working_dir`
    ///
    /// # Errors
    /// `SessionAlreadyExists` if the identifier is live (including when a
    /// concurrent creator wins the race), `Gateway` for any other failure
    pub async fn create(&self, id: &SessionId, working_dir: &Path, command: &str) -> Result<()> {
        if self.exists(id).await? {
            return Err(HiveError::session_already_exists(id.as_str()));
        }

        let output = self
            .exec([
                "new-session".to_string(),
                "-d".to_string(),
                "-s".to_string(),
                id.to_string(),
                "-c".to_string(),
                working_dir.display().to_string(),
                command.to_string(),
            ])
            .await?;

        if output.success() {
            log::info!("Created session {id} in {}", working_dir.display());
            Ok(())
        } else if is_duplicate_session(&output.stderr) {
            Err(HiveError::session_already_exists(id.as_str()))
        } else {
            Err(HiveError::gateway("new-session", output.diagnostic()))
        }
    }

    /// Terminate the session and its process tree
    ///
    /// # Errors
    /// `SessionNotFound` if absent, `Gateway` if tmux refuses
    pub async fn destroy(&self, id: &SessionId) -> Result<()> {
        self.require(id).await?;

        let output = self
            .exec(["kill-session".to_string(), "-t".to_string(), session_target(id)])
            .await?;

        if output.success() {
            log::info!("Killed session {id}");
            Ok(())
        } else {
            Err(HiveError::gateway("kill-session", output.diagnostic()))
        }
    }

    /// Type `text` into the session literally, optionally followed by Enter
    ///
    /// # Errors
    /// `SessionNotFound` if absent, `Gateway` if tmux refuses
    pub async fn send_input(&self, id: &SessionId, text: &str, press_enter: bool) -> Result<()> {
        self.require(id).await?;

        let target = pane_target(id);
        let output = self
            .exec([
                "send-keys".to_string(),
                "-t".to_string(),
                target.clone(),
                "-l".to_string(),
                "--".to_string(),
                text.to_string(),
            ])
            .await?;
        if !output.success() {
            return Err(HiveError::gateway("send-keys", output.diagnostic()));
        }

        if press_enter {
            let output = self
                .exec(["send-keys".to_string(), "-t".to_string(), target, "Enter".to_string()])
                .await?;
            if !output.success() {
                return Err(HiveError::gateway("send-keys", output.diagnostic()));
            }
        }

        log::debug!("Sent {} bytes to {id}", text.len());
        Ok(())
    }

    /// Last `line_count` lines of the session's terminal, trailing whitespace trimmed
    ///
    /// # Errors
    /// `SessionNotFound` if absent, `Gateway` if tmux refuses
    pub async fn capture_output(&self, id: &SessionId, line_count: usize) -> Result<String> {
        self.require(id).await?;

        let output = self
            .exec([
                "capture-pane".to_string(),
                "-p".to_string(),
                "-t".to_string(),
                pane_target(id),
                "-S".to_string(),
                format!("-{line_count}"),
            ])
            .await?;

        if output.success() {
            Ok(tail_lines(&output.stdout, line_count))
        } else {
            Err(HiveError::gateway("capture-pane", output.diagnostic()))
        }
    }

    /// Current working path of the session's active pane
    ///
    /// Returns `None` when tmux answers with nothing usable.
    ///
    /// # Errors
    /// `SessionNotFound` if absent, `Gateway` if tmux refuses
    pub async fn describe(&self, id: &SessionId) -> Result<Option<String>> {
        self.require(id).await?;

        let output = self
            .exec([
                "display-message".to_string(),
                "-p".to_string(),
                "-t".to_string(),
                pane_target(id),
                DESCRIBE_FORMAT.to_string(),
            ])
            .await?;

        if output.success() {
            Ok(parse_describe(&output.stdout))
        } else {
            Err(HiveError::gateway("display-message", output.diagnostic()))
        }
    }

    /// All live sessions whose identifier starts with `prefix_filter`
    ///
    /// Defaults to the namespace prefix. A server with no sessions is an
    /// empty list, not an error.
    ///
    /// # Errors
    /// `Gateway` for failures other than "nothing to list"
    pub async fn list_all(&self, prefix_filter: Option<&str>) -> Result<Vec<SessionSummary>> {
        let output = self
            .exec(["list-sessions".to_string(), "-F".to_string(), LIST_FORMAT.to_string()])
            .await?;

        if !output.success() {
            if is_empty_server(&output.stderr) {
                return Ok(Vec::new());
            }
            return Err(HiveError::gateway("list-sessions", output.diagnostic()));
        }

        let prefix = prefix_filter.unwrap_or_else(|| self.namespace.prefix());
        let mut sessions: Vec<SessionSummary> = output
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| parse_session_line(line, &self.namespace))
            .filter(|s| s.name.as_str().starts_with(prefix))
            .collect();

        sessions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sessions)
    }
}
