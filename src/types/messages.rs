//! Coordination message types

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Message type convention; unknown values are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    /// Asks the recipient to do something
    #[default]
    Request,
    /// Answers a request
    Response,
    /// Needs attention now
    Alert,
    /// Informational
    Info,
    /// Anything else a writer chose
    Other(String),
}

impl MessageType {
    /// Text as it appears in the message document
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Request => "REQUEST",
            Self::Response => "RESPONSE",
            Self::Alert => "ALERT",
            Self::Info => "INFO",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for MessageType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "REQUEST" => Self::Request,
            "RESPONSE" => Self::Response,
            "ALERT" => Self::Alert,
            "INFO" => Self::Info,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<&str> for MessageType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<MessageType> for String {
    fn from(t: MessageType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message about to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Who is writing (e.g. `CONDUCTOR`)
    pub sender: String,
    /// Who should read it (e.g. `FORGE`, `ALL`)
    pub recipient: String,
    /// Convention tag
    pub message_type: MessageType,
    /// One-line subject
    pub subject: String,
    /// Free text
    pub body: String,
}

impl NewMessage {
    /// Build a `REQUEST` message
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            message_type: MessageType::default(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Override the message type
    #[must_use]
    pub fn with_type(mut self, message_type: impl Into<MessageType>) -> Self {
        self.message_type = message_type.into();
        self
    }
}

/// Confirmation of an appended message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Minute-resolution local timestamp, `YYYY-MM-DD HH:MM`
    pub timestamp: String,
    /// Sender as written
    pub sender: String,
    /// Recipient as written
    pub recipient: String,
    /// Message type as written
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Subject as written
    pub subject: String,
}

/// Optional narrowing of a message log read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Keep entries sent by, addressed to, or broadcast to this agent
    pub agent: Option<String>,
    /// Keep only the ACTIVE partition
    pub only_active: bool,
}

impl MessageFilter {
    /// TRUE if the filter would return the document verbatim
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agent.is_none() && !self.only_active
    }
}

/// Text of a coordination document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Absolute location of the document
    pub path: PathBuf,
    /// Contents, verbatim unless a filter was applied
    pub content: String,
}
