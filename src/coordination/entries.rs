//! Message document layout: partitions, entry blocks and filtering
//!
//! An entry block looks like
//!
//! ```text
//! ### [2025-01-31 14:05] CONDUCTOR→FORGE | REQUEST
//! **Subject:** Build the parser
//!
//! Body text...
//!
//! ---
//! ```
//!
//! Parsing is tolerant: text that does not look like an entry is skipped,
//! never rejected.

use crate::types::messages::{MessageFilter, NewMessage};

/// Header opening the partition of open items
pub const ACTIVE_HEADER: &str = "## ACTIVE";

/// Header opening the partition of closed items
pub const RESOLVED_HEADER: &str = "## RESOLVED";

/// Contents of a freshly created message document
pub const SKELETON: &str = "# MESSAGES\n\n## ACTIVE\n\n## RESOLVED\n";

/// Recipient that addresses every agent
const BROADCAST_RECIPIENT: &str = "ALL";

/// Routing part of a `### [...] A→B | TYPE` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryHeader<'a> {
    pub sender: &'a str,
    pub recipient: &'a str,
}

/// One entry block, borrowed from the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<'a> {
    pub header: EntryHeader<'a>,
    pub raw: &'a str,
}

impl Entry<'_> {
    fn involves(&self, agent: &str) -> bool {
        let agent = agent.trim();
        self.header.sender.trim().eq_ignore_ascii_case(agent)
            || self.header.recipient.trim().eq_ignore_ascii_case(agent)
            || self.header.recipient.trim().eq_ignore_ascii_case(BROADCAST_RECIPIENT)
    }
}

pub(crate) fn parse_header(line: &str) -> Option<EntryHeader<'_>> {
    let rest = line.trim_end().strip_prefix("### [")?;
    let (_timestamp, rest) = rest.split_once("] ")?;
    let (route, _message_type) = rest.rsplit_once(" | ")?;
    let (sender, recipient) = route
        .split_once('→')
        .or_else(|| route.split_once("->"))?;

    Some(EntryHeader { sender, recipient })
}

fn is_partition_header(line: &str) -> bool {
    line == ACTIVE_HEADER || line == RESOLVED_HEADER
}

fn is_section_line(line: &str) -> bool {
    line.starts_with("# ") || line.starts_with("## ")
}

fn is_rule(line: &str) -> bool {
    line == "---"
}

/// Split `text` into entry blocks
///
/// A block runs from its header to the closing `---` line inclusive, or to
/// the next entry header or partition header when the rule is missing.
/// Markdown headings inside a block belong to its body.
pub(crate) fn parse_entries(text: &str) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    let mut current: Option<(usize, EntryHeader<'_>)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim_end();

        if let Some(header) = parse_header(trimmed) {
            if let Some((from, previous)) = current.take() {
                entries.push(Entry { header: previous, raw: &text[from..start] });
            }
            current = Some((start, header));
        } else if is_partition_header(trimmed) {
            if let Some((from, header)) = current.take() {
                entries.push(Entry { header, raw: &text[from..start] });
            }
        } else if is_rule(trimmed)
            && let Some((from, header)) = current.take()
        {
            entries.push(Entry { header, raw: &text[from..offset] });
        }
    }

    if let Some((from, header)) = current.take() {
        entries.push(Entry { header, raw: &text[from..] });
    }

    entries
}

/// Location of the first `## ACTIVE` line
struct HeaderLine {
    start: usize,
    end: usize,
    missing_newline: bool,
}

fn find_active_header(text: &str) -> Option<HeaderLine> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if line.trim_end() == ACTIVE_HEADER {
            return Some(HeaderLine {
                start,
                end: offset,
                missing_newline: !line.ends_with('\n'),
            });
        }
    }
    None
}

/// The ACTIVE partition, header included
///
/// It ends at the next partition header, or at a `#`/`##` heading that sits
/// between entry blocks. Headings inside an entry body do not end it.
pub(crate) fn active_partition(text: &str) -> Option<&str> {
    let header = find_active_header(text)?;

    let mut in_entry = false;
    let mut offset = header.end;
    for line in text[header.end..].split_inclusive('\n') {
        let trimmed = line.trim_end();
        if parse_header(trimmed).is_some() {
            in_entry = true;
        } else if is_rule(trimmed) {
            in_entry = false;
        } else if is_partition_header(trimmed) || (!in_entry && is_section_line(trimmed)) {
            return Some(&text[header.start..offset]);
        }
        offset += line.len();
    }
    Some(&text[header.start..])
}

/// Apply `filter` to a message document
pub(crate) fn filter_document(text: &str, filter: &MessageFilter) -> String {
    let scope = if filter.only_active {
        active_partition(text).unwrap_or("")
    } else {
        text
    };

    match filter.agent.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        None => scope.to_string(),
        Some(agent) => parse_entries(scope)
            .into_iter()
            .filter(|entry| entry.involves(agent))
            .map(|entry| entry.raw)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Single-line fields must not break the header or subject line
fn one_line(field: &str) -> String {
    field.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Body lines that would read as document structure are escaped
///
/// That covers partition headers, entry headers and the closing rule.
fn escape_body(body: &str) -> String {
    body.lines()
        .map(|line| {
            let trimmed = line.trim_end();
            if is_partition_header(trimmed) || is_rule(trimmed) || parse_header(trimmed).is_some() {
                format!("\\{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the block for `message` stamped with `timestamp`
pub(crate) fn format_entry(message: &NewMessage, timestamp: &str) -> String {
    format!(
        "\n### [{timestamp}] {}→{} | {}\n**Subject:** {}\n\n{}\n\n---\n",
        one_line(&message.sender),
        one_line(&message.recipient),
        one_line(message.message_type.as_str()),
        one_line(&message.subject),
        escape_body(&message.body),
    )
}

/// Insert `entry` right after the ACTIVE header, or append it when missing
pub(crate) fn insert_entry(document: &str, entry: &str) -> String {
    match find_active_header(document) {
        Some(header) => {
            let mut out = String::with_capacity(document.len() + entry.len() + 1);
            out.push_str(&document[..header.end]);
            if header.missing_newline {
                out.push('\n');
            }
            out.push_str(entry);
            out.push_str(&document[header.end..]);
            out
        }
        None => {
            let mut out = document.to_string();
            out.push_str(entry);
            out
        }
    }
}
