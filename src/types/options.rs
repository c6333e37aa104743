//! Orchestrator configuration
//!
//! `HiveConfig` carries every knob the orchestrator and coordination log read,
//! with a builder for programmatic setup and `from_env` for the two
//! environment overrides the server honours.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::identifiers::SessionNamespace;

/// Environment variable overriding the default project directory
pub const PROJECT_DIR_ENV: &str = "HIVEMIND_PROJECT_DIR";

/// Environment variable overriding the session prefix
pub const PREFIX_ENV: &str = "HIVEMIND_TMUX_PREFIX";

// ============================================================================
// Hive Config
// ============================================================================

/// Main configuration for the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiveConfig {
    /// Namespace prefix for session identifiers
    pub prefix: String,
    /// Separator between prefix and short name
    pub separator: String,
    /// Default project root for spawns and coordination documents
    pub project_dir: PathBuf,
    /// Multiplexer CLI
    pub multiplexer_program: String,
    /// Version-control CLI
    pub vcs_program: String,
    /// Namespace for branches created for worktrees
    pub branch_prefix: String,
    /// Worktree parent directory, relative to the base directory
    pub worktree_dir: String,
    /// Coordination directory, relative to the project directory
    pub coordination_dir: String,
    /// Pause between session creation and initial prompt delivery
    #[serde(with = "duration_ms")]
    pub warmup_delay: Duration,
    /// Upper bound on any single external call
    #[serde(with = "duration_ms")]
    pub command_timeout: Duration,
    /// Lines captured when a read does not say
    pub default_read_lines: usize,
    /// Largest line count a read may request
    pub max_read_lines: usize,
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            prefix: "hive".to_string(),
            separator: "-".to_string(),
            project_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            multiplexer_program: "tmux".to_string(),
            vcs_program: "git".to_string(),
            branch_prefix: "squad".to_string(),
            worktree_dir: ".worktrees".to_string(),
            coordination_dir: ".hivemind".to_string(),
            warmup_delay: Duration::from_secs(2),
            command_timeout: Duration::from_secs(30),
            default_read_lines: 50,
            max_read_lines: 500,
        }
    }
}

impl HiveConfig {
    /// Create a new builder for `HiveConfig`
    #[must_use]
    pub fn builder() -> HiveConfigBuilder {
        HiveConfigBuilder::default()
    }

    /// Defaults overlaid with `HIVEMIND_PROJECT_DIR` and `HIVEMIND_TMUX_PREFIX`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(PROJECT_DIR_ENV)
            && !dir.trim().is_empty()
        {
            config.project_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var(PREFIX_ENV)
            && !prefix.trim().is_empty()
        {
            config.prefix = prefix.trim().to_string();
        }
        config
    }

    /// Session namespace derived from prefix and separator
    #[must_use]
    pub fn namespace(&self) -> SessionNamespace {
        SessionNamespace::new(&self.prefix, &self.separator)
    }

    /// Project directory to use when a request leaves it out
    #[must_use]
    pub fn resolve_project_dir(&self, requested: Option<&Path>) -> PathBuf {
        requested.map_or_else(|| self.project_dir.clone(), Path::to_path_buf)
    }
}

// ============================================================================
// Builder for HiveConfig
// ============================================================================

/// Builder for `HiveConfig`
#[derive(Debug, Default)]
pub struct HiveConfigBuilder {
    config: HiveConfig,
}

impl HiveConfigBuilder {
    /// Set the session prefix
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set the prefix separator
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Set the default project directory
    #[must_use]
    pub fn project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.project_dir = dir.into();
        self
    }

    /// Set the multiplexer CLI
    #[must_use]
    pub fn multiplexer_program(mut self, program: impl Into<String>) -> Self {
        self.config.multiplexer_program = program.into();
        self
    }

    /// Set the version-control CLI
    #[must_use]
    pub fn vcs_program(mut self, program: impl Into<String>) -> Self {
        self.config.vcs_program = program.into();
        self
    }

    /// Set the worktree branch namespace
    #[must_use]
    pub fn branch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.branch_prefix = prefix.into();
        self
    }

    /// Set the warm-up delay before an initial prompt
    #[must_use]
    pub const fn warmup_delay(mut self, delay: Duration) -> Self {
        self.config.warmup_delay = delay;
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub const fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    /// Set the read line bounds
    ///
    /// `max_lines` is raised to at least 1 and `default_lines` is clamped
    /// into `1..=max_lines`.
    #[must_use]
    pub fn read_lines(mut self, default_lines: usize, max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        self.config.default_read_lines = default_lines.clamp(1, max_lines);
        self.config.max_read_lines = max_lines;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> HiveConfig {
        self.config
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
