//! Session spawning logic
//!
//! Validates preconditions, provisions an optional worktree, synthesizes the
//! launch command and only then asks the multiplexer to create the session.

use std::path::PathBuf;

use crate::command::synthesize;
use crate::error::{HiveError, Result};
use crate::process::CommandRunner;
use crate::types::agent::{AgentSpec, SpawnResponse};

use super::core::SessionOrchestrator;

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Request parameters for spawning a new agent session
#[derive(Debug, Clone, Default)]
pub struct SpawnSessionRequest {
    /// Short name (or already-qualified identifier) for the session
    pub name: String,
    /// What to launch
    pub spec: AgentSpec,
    /// Base directory; defaults to the configured project directory
    pub working_dir: Option<PathBuf>,
    /// Run the agent in its own git worktree
    pub use_worktree: bool,
    /// Worktree branch; defaults to the short name
    pub branch_name: Option<String>,
}

impl SpawnSessionRequest {
    /// Request to launch `spec` under `name` in the project directory
    pub fn new(name: impl Into<String>, spec: AgentSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            ..Default::default()
        }
    }

    /// Root the session at `dir`
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Isolate the session in a worktree, optionally on a named branch
    #[must_use]
    pub fn worktree(mut self, branch_name: Option<String>) -> Self {
        self.use_worktree = true;
        self.branch_name = branch_name;
        self
    }
}

// ============================================================================
// SPAWN IMPLEMENTATION
// ============================================================================

impl<R: CommandRunner> SessionOrchestrator<R> {
    /// Spawn a new agent session
    ///
    /// The multiplexer `create` call is the only state-changing step on the
    /// session side and happens last, so any earlier failure leaves no new
    /// session behind. When an initial prompt is given it is typed in after
    /// the configured warm-up delay; a failed delivery is reported through
    /// `initial_prompt_sent` rather than failing the spawn.
    ///
    /// # Errors
    /// `SessionAlreadyExists`, `MissingCustomCommand`, `WorkspaceProvision`,
    /// `InvalidArguments`, `Gateway` - whichever step failed first
    pub async fn spawn(&self, request: SpawnSessionRequest) -> Result<SpawnResponse> {
        let id = self.resolve(&request.name)?;
        let short_name = self.namespace.unqualify(id.as_str()).to_string();

        if self.multiplexer.exists(&id).await? {
            return Err(HiveError::session_already_exists(id.as_str()));
        }

        // Synthesis precedes worktree provisioning: a rejected command must
        // leave no worktree behind
        let command = synthesize(&request.spec)?;

        let mut working_dir = self.config.resolve_project_dir(request.working_dir.as_deref());
        if request.use_worktree {
            let branch = request
                .branch_name
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .unwrap_or(short_name.as_str());
            working_dir = self.provisioner.provision(&working_dir, branch).await?;
        }

        log::debug!("Spawning {id}: {command}");
        self.multiplexer.create(&id, &working_dir, &command).await?;

        let mut initial_prompt_sent = false;
        if let Some(prompt) = request.spec.initial_prompt.as_deref().filter(|p| !p.is_empty()) {
            tokio::time::sleep(self.config.warmup_delay).await;
            match self.multiplexer.send_input(&id, prompt, true).await {
                Ok(()) => initial_prompt_sent = true,
                Err(e) => log::warn!("Initial prompt for {id} was not delivered: {e}"),
            }
        }

        log::info!(
            "Spawned {} agent {id} in {}",
            request.spec.program,
            working_dir.display()
        );

        Ok(SpawnResponse {
            success: true,
            attach_command: self.multiplexer.attach_command(&id),
            session_name: id,
            short_name,
            program: request.spec.program,
            model: request.spec.model,
            working_dir,
            worktree: request.use_worktree,
            command,
            initial_prompt_sent,
        })
    }
}
