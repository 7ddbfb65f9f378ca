//! Codec between an ordered message sequence and a markdown transcript
//! document.
//!
//! [`encode`] produces a metadata header followed by one `## User` /
//! `## Assistant` block per dialogue message, in original order. [`decode`]
//! parses those two block titles back into messages, tolerating and skipping
//! the header and any unrecognized titled block. Round-trip law: for any
//! dialogue sequence `M` and metadata `D`, `decode(encode(M, D))` yields `M`
//! with each content block trimmed of surrounding whitespace.

use chrono::{DateTime, Utc};
use taskdraft_core::{Message, Role, TaskdraftError, TaskdraftResult};

const USER_HEADING: &str = "## User";
const ASSISTANT_HEADING: &str = "## Assistant";

/// Metadata written into a transcript header. Informational only; `decode`
/// skips it.
#[derive(Debug, Clone)]
pub struct TranscriptMeta {
    /// Human-readable role label, e.g. `"Developer"`.
    pub role_label: String,
    /// Repository reference string.
    pub repository: String,
    /// Name of the attached task file, if any.
    pub file_name: Option<String>,
    /// When the transcript was exported.
    pub date: DateTime<Utc>,
}

/// The result of decoding a transcript document.
///
/// Decoding is strict about structure but lenient about content: blocks with
/// an unknown title are counted in `skipped_blocks` rather than failing the
/// whole document, and the caller decides whether partial recovery is
/// acceptable.
#[derive(Debug, Clone)]
pub struct DecodedTranscript {
    /// The recognized dialogue messages, in document order.
    pub messages: Vec<Message>,
    /// Number of titled blocks that were not `User` or `Assistant`.
    pub skipped_blocks: usize,
}

/// Encodes the dialogue portion of `messages` into a transcript document.
///
/// System messages are never exported; everything else is written verbatim
/// under its role's heading.
pub fn encode(messages: &[Message], meta: &TranscriptMeta) -> String {
    let mut doc = String::new();
    doc.push_str("# TaskDraft Transcript\n\n");
    doc.push_str(&format!(
        "- Date: {}\n",
        meta.date.format("%Y-%m-%d %H:%M:%S")
    ));
    doc.push_str(&format!("- Role: {}\n", meta.role_label));
    doc.push_str(&format!("- Repository: {}\n", meta.repository));
    if let Some(name) = &meta.file_name {
        doc.push_str(&format!("- Task file: {name}\n"));
    }

    for message in messages {
        let heading = match message.role {
            Role::User => USER_HEADING,
            Role::Assistant => ASSISTANT_HEADING,
            Role::System => continue,
        };
        doc.push_str(&format!("\n{heading}\n\n{}\n", message.content));
    }
    doc
}

/// Decodes a transcript document back into its dialogue messages.
///
/// Everything before the first recognized heading (the metadata header) is
/// ignored. Fails with [`TaskdraftError::Transcript`] only when the document
/// contains no recognizable block at all.
pub fn decode(document: &str) -> TaskdraftResult<DecodedTranscript> {
    let mut messages = Vec::new();
    let mut skipped_blocks = 0usize;
    // Role of the block being accumulated; None while in the header or in an
    // unrecognized block.
    let mut current: Option<Role> = None;
    let mut buffer = String::new();

    let flush = |role: Option<Role>, buffer: &mut String, messages: &mut Vec<Message>| {
        if let Some(role) = role {
            messages.push(Message::new(role, buffer.trim()));
        }
        buffer.clear();
    };

    for line in document.lines() {
        let trimmed = line.trim_end();
        if trimmed == USER_HEADING {
            flush(current, &mut buffer, &mut messages);
            current = Some(Role::User);
        } else if trimmed == ASSISTANT_HEADING {
            flush(current, &mut buffer, &mut messages);
            current = Some(Role::Assistant);
        } else if trimmed.starts_with("## ") {
            flush(current, &mut buffer, &mut messages);
            current = None;
            skipped_blocks += 1;
        } else if current.is_some() {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }
    flush(current, &mut buffer, &mut messages);

    if messages.is_empty() {
        return Err(TaskdraftError::Transcript(
            "no conversation blocks found".to_string(),
        ));
    }
    Ok(DecodedTranscript {
        messages,
        skipped_blocks,
    })
}
