//! Git worktree provisioning for isolated agent workspaces
//!
//! `provision` is idempotent on path existence: an existing worktree directory
//! is returned as-is without touching git. Otherwise it tries to create the
//! worktree on a fresh `<branch_prefix>/<branch>` branch and, if that fails
//! (typically because the branch exists), attaches to the existing branch once.

use std::path::{Component, Path, PathBuf};

use crate::error::{HiveError, Result};
use crate::process::{CommandRunner, Invocation};

/// Creates branch-bound working copies under `<base>/<worktree_dir>/`
#[derive(Debug, Clone)]
pub struct WorktreeProvisioner<R> {
    runner: R,
    program: String,
    branch_prefix: String,
    worktree_dir: String,
}

impl<R: CommandRunner> WorktreeProvisioner<R> {
    /// Create a provisioner running `program` (normally `git`) through `runner`
    pub fn new(
        runner: R,
        program: impl Into<String>,
        branch_prefix: impl Into<String>,
        worktree_dir: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            branch_prefix: branch_prefix.into(),
            worktree_dir: worktree_dir.into(),
        }
    }

    /// Where the worktree for `branch` lives under `base_dir`
    #[must_use]
    pub fn worktree_path(&self, base_dir: &Path, branch: &str) -> PathBuf {
        base_dir.join(&self.worktree_dir).join(branch)
    }

    /// Fully-qualified branch name for `branch`
    #[must_use]
    pub fn qualified_branch(&self, branch: &str) -> String {
        format!("{}/{branch}", self.branch_prefix)
    }

    /// Ensure a worktree for `branch` exists under `base_dir` and return its path
    ///
    /// # Errors
    /// `InvalidArguments` for a branch name that would escape the worktree
    /// directory, `Io` if the parent directory cannot be created,
    /// `WorkspaceProvision` if both git attempts fail
    pub async fn provision(&self, base_dir: &Path, branch: &str) -> Result<PathBuf> {
        validate_branch(branch)?;

        let parent = base_dir.join(&self.worktree_dir);
        tokio::fs::create_dir_all(&parent).await?;

        let path = parent.join(branch);
        if tokio::fs::try_exists(&path).await? {
            log::debug!("Reusing worktree {}", path.display());
            return Ok(path);
        }

        let qualified = self.qualified_branch(branch);
        let path_arg = path.display().to_string();

        let create = Invocation::new(&self.program)
            .args(["worktree", "add"])
            .arg(&path_arg)
            .arg("-b")
            .arg(&qualified)
            .current_dir(base_dir);
        let created = self.runner.run(&create).await?;
        if created.success() {
            log::info!("Created worktree {} on new branch {qualified}", path.display());
            return Ok(path);
        }

        log::debug!(
            "Creating branch {qualified} failed ({}), attaching to existing branch",
            created.diagnostic()
        );

        let attach = Invocation::new(&self.program)
            .args(["worktree", "add"])
            .arg(&path_arg)
            .arg(&qualified)
            .current_dir(base_dir);
        let attached = self.runner.run(&attach).await?;
        if attached.success() {
            log::info!("Created worktree {} on existing branch {qualified}", path.display());
            return Ok(path);
        }

        Err(HiveError::workspace_provision(
            path,
            format!("{}; {}", created.diagnostic(), attached.diagnostic()),
        ))
    }
}

/// Reject names that are empty, absolute, option-like or climb out of the parent
fn validate_branch(branch: &str) -> Result<()> {
    let trimmed = branch.trim();
    if trimmed.is_empty() {
        return Err(HiveError::invalid_arguments("branch name must not be empty"));
    }
    if trimmed.starts_with('-') {
        return Err(HiveError::invalid_arguments(format!(
            "branch name '{branch}' must not start with '-'"
        )));
    }
    let escapes = Path::new(trimmed)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(HiveError::invalid_arguments(format!(
            "branch name '{branch}' must be a relative name without '..'"
        )));
    }
    Ok(())
}
