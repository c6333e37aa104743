//! `tokio::process` backed runner

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::{HiveError, Result};

use super::{CommandOutput, CommandRunner, Invocation};

/// Default bound on a single external call
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs invocations as real child processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Runner with the given per-call timeout
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run_impl(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref cwd) = invocation.cwd {
            cmd.current_dir(cwd);
        }

        log::debug!("exec: {invocation}");

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                if let Some(ref cwd) = invocation.cwd
                    && !cwd.exists()
                {
                    return HiveError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("Working directory does not exist: {}", cwd.display()),
                    ));
                }
                HiveError::cli_not_found(&invocation.program)
            } else {
                HiveError::Io(e)
            }
        })?;

        // Dropping the wait future on timeout kills the child via kill_on_drop
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                HiveError::timeout(format!(
                    "'{}' did not finish within {:?}",
                    invocation, self.timeout
                ))
            })??;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl std::future::Future<Output = Result<CommandOutput>> + Send {
        self.run_impl(invocation)
    }
}
