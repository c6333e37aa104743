//! Coordination log over the shared status board and message document
//!
//! Both documents live under `<project>/<coordination_dir>/`. The status
//! board is only ever read. The message document is read (optionally
//! filtered) and appended to with the ACTIVE/RESOLVED partition convention.
//!
//! Writes are a plain read-modify-write of the whole file with no lock, so
//! two writers racing on the same document can lose an entry.

mod append;
mod board;
pub mod entries;

pub use append::TIMESTAMP_FORMAT;

use std::path::{Path, PathBuf};

use crate::types::options::HiveConfig;

/// File name of the status board
pub const STATUS_FILE: &str = "STATUS.md";

/// File name of the message document
pub const MESSAGES_FILE: &str = "MESSAGES.md";

/// Reader and writer for one configuration's coordination documents
#[derive(Debug, Clone)]
pub struct CoordinationLog {
    project_dir: PathBuf,
    coordination_dir: String,
}

impl CoordinationLog {
    /// Log rooted at `project_dir` using the default `.hivemind` directory
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            coordination_dir: HiveConfig::default().coordination_dir,
        }
    }

    /// Log using the project and coordination directories of `config`
    #[must_use]
    pub fn from_config(config: &HiveConfig) -> Self {
        Self {
            project_dir: config.project_dir.clone(),
            coordination_dir: config.coordination_dir.clone(),
        }
    }

    /// Default project directory
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Directory holding both documents for `project`
    #[must_use]
    pub fn directory(&self, project: Option<&Path>) -> PathBuf {
        project
            .unwrap_or(&self.project_dir)
            .join(&self.coordination_dir)
    }

    /// Location of the status board for `project`
    #[must_use]
    pub fn status_path(&self, project: Option<&Path>) -> PathBuf {
        self.directory(project).join(STATUS_FILE)
    }

    /// Location of the message document for `project`
    #[must_use]
    pub fn messages_path(&self, project: Option<&Path>) -> PathBuf {
        self.directory(project).join(MESSAGES_FILE)
    }
}
