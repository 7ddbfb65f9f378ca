//! Completion-service boundary for TaskDraft.
//!
//! The dispatcher treats the language model as an opaque synchronous call:
//! the full ordered message sequence goes in, a single assistant text comes
//! back, or a [`taskdraft_core::TaskdraftError::Service`] error. Providers
//! sit behind the [`CompletionBackend`] trait; [`CompletionClient`] picks the
//! backend from the configured provider. There is no streaming, no retry,
//! and no tool calling.

pub mod backends;
pub mod config;

mod client;

pub use backends::CompletionBackend;
pub use client::CompletionClient;
pub use config::{LlmProvider, ModelConfig};
