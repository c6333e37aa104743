//! tmux target syntax and output parsing
//!
//! Pure helpers; nothing here spawns a process.

use chrono::DateTime;

use crate::types::agent::SessionSummary;
use crate::types::identifiers::{SessionId, SessionNamespace};

/// `list-sessions -F` format: name, attach count, start dir, epoch seconds
pub(super) const LIST_FORMAT: &str =
    "#{session_name}|#{session_attached}|#{session_path}|#{session_created}";

/// `display-message -p` format for the session's paths
pub(super) const DESCRIBE_FORMAT: &str = "#{session_path}|#{pane_current_path}";

/// stderr fragments tmux prints when there is simply nothing to list
const EMPTY_SERVER_MARKERS: &[&str] = &["no server running", "no sessions", "error connecting to"];

/// stderr fragment for a name collision on `new-session`
const DUPLICATE_MARKER: &str = "duplicate session";

/// Exact-match session target, so `hive-forge` never resolves to `hive-forge2`
pub(super) fn session_target(id: &SessionId) -> String {
    format!("={id}")
}

/// Exact-match target for the active pane of a session
pub(super) fn pane_target(id: &SessionId) -> String {
    format!("={id}:")
}

pub(super) fn is_empty_server(stderr: &str) -> bool {
    EMPTY_SERVER_MARKERS.iter().any(|m| stderr.contains(m))
}

pub(super) fn is_duplicate_session(stderr: &str) -> bool {
    stderr.contains(DUPLICATE_MARKER)
}

/// Parse one `LIST_FORMAT` line
///
/// The name never contains `|` and the attach count and timestamp are
/// numeric, so everything between the second and the last separator is the
/// path, even if it contains `|` itself.
pub(super) fn parse_session_line(line: &str, namespace: &SessionNamespace) -> Option<SessionSummary> {
    let (name, rest) = line.split_once('|')?;
    let (attached, rest) = rest.split_once('|')?;
    let (path, created) = rest.rsplit_once('|')?;

    if name.is_empty() {
        return None;
    }

    let created = created
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    Some(SessionSummary {
        name: SessionId::new(name),
        short_name: namespace.unqualify(name).to_string(),
        attached: attached.trim().parse::<u32>().is_ok_and(|n| n > 0),
        path: path.to_string(),
        created,
    })
}

/// Parse `DESCRIBE_FORMAT` output, preferring the pane's current path
pub(super) fn parse_describe(stdout: &str) -> Option<String> {
    let line = stdout.trim();
    if line.is_empty() {
        return None;
    }
    match line.rsplit_once('|') {
        Some((session_path, pane_path)) => {
            if pane_path.trim().is_empty() {
                Some(session_path.trim().to_string()).filter(|p| !p.is_empty())
            } else {
                Some(pane_path.trim().to_string())
            }
        }
        None => Some(line.to_string()),
    }
}

/// Trim trailing whitespace and keep at most the last `n` lines
pub(super) fn tail_lines(text: &str, n: usize) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
