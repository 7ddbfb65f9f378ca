//! Session and transcript persistence for TaskDraft.
//!
//! This crate owns everything the REPL needs to keep a conversation
//! consistent and durable:
//!
//! - [`ConversationSession`] — the in-memory message log, always led by one
//!   system message.
//! - [`transcript`] — the codec between a message sequence and a markdown
//!   transcript document (round-trip safe).
//! - [`ExportCatalog`] — the insertion-ordered record of saved transcripts,
//!   backed by a single JSON document.
//! - [`SnapshotStore`] — the single "resume point" record, backed by a
//!   single JSON document.
//!
//! Both stores persist by whole-document replace through a
//! write-temp-then-rename, so a crash mid-write never leaves a partially
//! written document behind.

pub mod catalog;
pub mod session;
pub mod snapshot;
pub mod transcript;

mod store;

pub use catalog::{ExportCatalog, ExportEntry};
pub use session::ConversationSession;
pub use snapshot::{SessionSnapshot, SnapshotStore};
pub use transcript::{DecodedTranscript, TranscriptMeta};
