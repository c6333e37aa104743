//! Session identifiers and namespace qualification
//!
//! A short name like `forge` becomes the multiplexer identifier `hive-forge`.
//! Qualification is idempotent, so callers may pass either form.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Newtype Wrappers for Type Safety
// ============================================================================

/// Fully-qualified multiplexer session identifier (prefix applied)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an already-qualified identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Namespace
// ============================================================================

/// Prefix convention separating our sessions from unrelated ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNamespace {
    prefix: String,
    separator: String,
}

impl SessionNamespace {
    /// Create a namespace from a prefix and separator (e.g. `"hive"`, `"-"`)
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
        }
    }

    /// The bare prefix, used as the default listing filter
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `prefix + separator`, the start of every qualified identifier
    #[must_use]
    pub fn lead(&self) -> String {
        format!("{}{}", self.prefix, self.separator)
    }

    /// Map a short name to its fully-qualified identifier
    ///
    /// Names that already carry `prefix + separator` are returned unchanged.
    #[must_use]
    pub fn qualify(&self, name: &str) -> SessionId {
        if name.starts_with(&self.lead()) {
            SessionId::new(name)
        } else {
            SessionId::new(format!("{}{}", self.lead(), name))
        }
    }

    /// Strip the prefix once, for display
    #[must_use]
    pub fn unqualify<'a>(&self, id: &'a str) -> &'a str {
        id.strip_prefix(&self.lead()).unwrap_or(id)
    }
}

impl Default for SessionNamespace {
    fn default() -> Self {
        Self::new("hive", "-")
    }
}
