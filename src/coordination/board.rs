//! Read access to the coordination documents

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{HiveError, Result};
use crate::types::messages::{DocumentContent, MessageFilter};

use super::entries::filter_document;
use super::{CoordinationLog, MESSAGES_FILE, STATUS_FILE};

impl CoordinationLog {
    /// Contents of the status board, verbatim
    ///
    /// # Errors
    /// `DocumentNotFound` if the board has not been created, `Io` otherwise
    pub async fn read_status(&self, project: Option<&Path>) -> Result<DocumentContent> {
        let path = self.status_path(project);
        let content = read_document(STATUS_FILE, &path).await?;
        Ok(DocumentContent { path, content })
    }

    /// Contents of the message document, narrowed by `filter`
    ///
    /// An empty filter returns the file verbatim.
    ///
    /// # Errors
    /// `DocumentNotFound` if the document has not been created, `Io` otherwise
    pub async fn read_messages(
        &self,
        project: Option<&Path>,
        filter: &MessageFilter,
    ) -> Result<DocumentContent> {
        let path = self.messages_path(project);
        let raw = read_document(MESSAGES_FILE, &path).await?;

        let content = if filter.is_empty() {
            raw
        } else {
            filter_document(&raw, filter)
        };
        Ok(DocumentContent { path, content })
    }
}

async fn read_document(name: &str, path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HiveError::document_not_found(name, path))
        }
        Err(e) => Err(e.into()),
    }
}
