use crate::backends::openai::OpenAiBackend;
use crate::backends::CompletionBackend;
use crate::config::ModelConfig;
use taskdraft_core::{Message, TaskdraftResult};

/// Completion client that dispatches to the configured provider backend.
///
/// All current providers share the OpenAI wire format, so they all route to
/// [`OpenAiBackend`]; a provider with its own protocol would get its own
/// [`CompletionBackend`] implementation wired up here.
pub struct CompletionClient {
    backend: Box<dyn CompletionBackend>,
}

impl CompletionClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            backend: Box::new(OpenAiBackend::new(config)),
        }
    }

    /// Create from a pre-built backend (for tests and custom providers).
    pub fn from_backend(backend: Box<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Requests one completion for the full message sequence.
    pub async fn complete(&self, messages: &[Message]) -> TaskdraftResult<String> {
        self.backend.complete(messages).await
    }
}
