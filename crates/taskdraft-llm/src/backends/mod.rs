pub mod openai;

use async_trait::async_trait;
use taskdraft_core::{Message, TaskdraftResult};

/// Trait for completion-service backends.
///
/// One call per chat turn: the full ordered message sequence (system message
/// first) goes in, a single assistant text comes back. Implementations map
/// transport and API failures to `TaskdraftError::Service`; the dispatcher
/// reports those and keeps the loop running.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Requests one completion for `messages`.
    async fn complete(&self, messages: &[Message]) -> TaskdraftResult<String>;
}
