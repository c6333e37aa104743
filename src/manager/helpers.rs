//! Helper functions for request validation and response shaping
//!
//! Pure functions, no I/O.

use crate::error::{HiveError, Result};

/// Longest short name accepted for a session
pub(super) const MAX_NAME_LEN: usize = 50;

/// Characters of sent text echoed back in a send response
pub(super) const PREVIEW_CHARS: usize = 100;

/// Validate a user-supplied session name and return it trimmed
///
/// tmux silently rewrites `.` and `:` in session names, which would break the
/// name-to-identifier mapping, so they are rejected up front.
pub(super) fn validate_session_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HiveError::invalid_arguments("session name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(HiveError::invalid_arguments(format!(
            "session name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if name.contains(['.', ':']) || name.chars().any(char::is_whitespace) {
        return Err(HiveError::invalid_arguments(format!(
            "session name '{name}' must not contain '.', ':' or whitespace"
        )));
    }
    Ok(name)
}

/// First `max_chars` characters of `text`, with `...` when truncated
pub(super) fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Number of lines in captured output; empty output has none
pub(super) fn count_lines(output: &str) -> usize {
    if output.is_empty() {
        0
    } else {
        output.lines().count()
    }
}
