//! Core orchestrator structure
//!
//! Provides the `SessionOrchestrator` struct and its constructors.

use crate::multiplexer::Multiplexer;
use crate::process::{CommandRunner, SystemRunner};
use crate::types::identifiers::{SessionId, SessionNamespace};
use crate::types::options::HiveConfig;
use crate::workspace::WorktreeProvisioner;

use super::super::helpers::validate_session_name;
use crate::error::Result;

// ============================================================================
// SESSION ORCHESTRATOR CORE
// ============================================================================

/// Coordinates agent sessions living in an external multiplexer
///
/// The orchestrator keeps no session table. Every operation re-derives the
/// truth from the multiplexer, so a session killed behind our back simply
/// shows up as `SessionNotFound` on the next call.
///
/// It composes:
/// - namespace qualification of user-facing names
/// - worktree provisioning for isolated spawns
/// - launch command synthesis
/// - the multiplexer gateway for every session call
pub struct SessionOrchestrator<R = SystemRunner> {
    pub(crate) config: HiveConfig,
    pub(crate) namespace: SessionNamespace,
    pub(crate) multiplexer: Multiplexer<R>,
    pub(crate) provisioner: WorktreeProvisioner<R>,
}

impl SessionOrchestrator<SystemRunner> {
    /// Create an orchestrator that runs real `tmux` and `git` processes
    #[must_use]
    pub fn new(config: HiveConfig) -> Self {
        let runner = SystemRunner::new(config.command_timeout);
        Self::with_runner(config, runner)
    }
}

impl<R: CommandRunner + Clone> SessionOrchestrator<R> {
    /// Create an orchestrator issuing every external call through `runner`
    pub fn with_runner(config: HiveConfig, runner: R) -> Self {
        let namespace = config.namespace();
        let multiplexer = Multiplexer::new(
            runner.clone(),
            &config.multiplexer_program,
            namespace.clone(),
        );
        let provisioner = WorktreeProvisioner::new(
            runner,
            &config.vcs_program,
            &config.branch_prefix,
            &config.worktree_dir,
        );

        Self {
            config,
            namespace,
            multiplexer,
            provisioner,
        }
    }
}

impl<R: CommandRunner> SessionOrchestrator<R> {
    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    /// Gateway used for all session calls
    #[must_use]
    pub fn multiplexer(&self) -> &Multiplexer<R> {
        &self.multiplexer
    }

    /// Provisioner used for isolated spawns
    #[must_use]
    pub fn provisioner(&self) -> &WorktreeProvisioner<R> {
        &self.provisioner
    }

    /// Validate a user-facing name and map it into the namespace
    pub(crate) fn resolve(&self, name: &str) -> Result<SessionId> {
        let name = validate_session_name(name)?;
        Ok(self.namespace.qualify(name))
    }
}
