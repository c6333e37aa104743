//! Session output and information queries
//!
//! Provides reading terminal output, attach details and environment diagnostics.

use crate::error::{HiveError, Result};
use crate::process::CommandRunner;
use crate::types::agent::{AttachInfo, DiagnosticsReport, ProgramLocation, ReadOutputResponse};

use super::super::helpers::count_lines;
use super::core::SessionOrchestrator;

impl<R: CommandRunner> SessionOrchestrator<R> {
    /// Read recent output from an agent session
    ///
    /// `lines` defaults to the configured read size and must lie within
    /// `1..=max_read_lines`.
    ///
    /// # Errors
    /// `InvalidArguments` for an out-of-range line count, `SessionNotFound`
    /// if the session is gone, `Gateway` if capturing fails
    pub async fn read_output(&self, name: &str, lines: Option<usize>) -> Result<ReadOutputResponse> {
        let id = self.resolve(name)?;
        let lines = lines.unwrap_or(self.config.default_read_lines);
        if lines == 0 || lines > self.config.max_read_lines {
            return Err(HiveError::invalid_arguments(format!(
                "lines must be between 1 and {}",
                self.config.max_read_lines
            )));
        }

        let output = self.multiplexer.capture_output(&id, lines).await?;

        Ok(ReadOutputResponse {
            session: id,
            lines_captured: count_lines(&output),
            output,
        })
    }

    /// Attach command and current working directory of a session
    ///
    /// Falls back to the configured project directory when the multiplexer
    /// reports no path.
    ///
    /// # Errors
    /// `SessionNotFound` if the session is gone, `Gateway` if tmux refuses
    pub async fn attach_info(&self, name: &str) -> Result<AttachInfo> {
        let id = self.resolve(name)?;
        let path = self
            .multiplexer
            .describe(&id)
            .await?
            .unwrap_or_else(|| self.config.project_dir.display().to_string());

        Ok(AttachInfo {
            attach_command: self.multiplexer.attach_command(&id),
            session: id,
            working_directory: path,
        })
    }

    /// Report external tool availability and namespace state
    ///
    /// Never fails: problems are part of the report.
    pub async fn diagnostics(&self) -> DiagnosticsReport {
        let (live_sessions, list_error) = match self.multiplexer.list_all(None).await {
            Ok(sessions) => (Some(sessions.len()), None),
            Err(e) => (None, Some(e.to_string())),
        };

        DiagnosticsReport {
            prefix: self.namespace.prefix().to_string(),
            project_dir: self.config.project_dir.clone(),
            multiplexer: locate(&self.config.multiplexer_program),
            vcs: locate(&self.config.vcs_program),
            live_sessions,
            list_error,
        }
    }
}

fn locate(program: &str) -> ProgramLocation {
    ProgramLocation {
        program: program.to_string(),
        path: which::which(program).ok(),
    }
}
