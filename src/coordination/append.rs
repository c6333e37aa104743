//! Appending entries to the message document

use std::io::ErrorKind;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::types::messages::{MessageRecord, NewMessage};

use super::CoordinationLog;
use super::entries::{SKELETON, format_entry, insert_entry};

/// Timestamp layout of entry headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

impl CoordinationLog {
    /// Append `message` under the ACTIVE header, stamped with local time
    ///
    /// Creates the coordination directory and a skeleton document when
    /// missing. The newest entry always sits directly below the header.
    ///
    /// # Errors
    /// `Io` if the document cannot be read or written
    pub async fn append_message(
        &self,
        project: Option<&Path>,
        message: NewMessage,
    ) -> Result<MessageRecord> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.append_message_at(project, message, timestamp).await
    }

    /// Append `message` with an explicit header timestamp
    ///
    /// # Errors
    /// `Io` if the document cannot be read or written
    pub async fn append_message_at(
        &self,
        project: Option<&Path>,
        message: NewMessage,
        timestamp: impl Into<String>,
    ) -> Result<MessageRecord> {
        let timestamp = timestamp.into();
        let path = self.messages_path(project);

        let current = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::create_dir_all(self.directory(project)).await?;
                log::info!("Creating message document at {}", path.display());
                SKELETON.to_string()
            }
            Err(e) => return Err(e.into()),
        };

        let entry = format_entry(&message, &timestamp);
        tokio::fs::write(&path, insert_entry(&current, &entry)).await?;

        log::debug!(
            "Appended {} {}→{} to {}",
            message.message_type,
            message.sender,
            message.recipient,
            path.display()
        );

        Ok(MessageRecord {
            timestamp,
            sender: message.sender,
            recipient: message.recipient,
            message_type: message.message_type,
            subject: message.subject,
        })
    }
}
