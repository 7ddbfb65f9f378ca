//! Core types and error definitions for TaskDraft.
//!
//! This crate provides the foundational types shared across all TaskDraft
//! crates: the conversation message model, the user-role enum driving the
//! assistant's system prompt, the attached-file descriptor, and the unified
//! error type.
//!
//! # Main types
//!
//! - [`TaskdraftError`] — Unified error enum for all TaskDraft subsystems.
//! - [`TaskdraftResult`] — Convenience alias for `Result<T, TaskdraftError>`.
//! - [`Role`] — Message role (system, user, assistant).
//! - [`Message`] — A single message within a conversation session.
//! - [`UserRole`] — Who the human is (product manager or developer).
//! - [`FileDescriptor`] — Metadata of a task-description file attached to a
//!   session.

pub mod error;
pub mod message;

pub use error::{TaskdraftError, TaskdraftResult};
pub use message::{FileDescriptor, Message, Role, UserRole};
