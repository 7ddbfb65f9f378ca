use super::CompletionBackend;
use crate::config::{LlmProvider, ModelConfig};
use async_trait::async_trait;
use taskdraft_core::{Message, Role, TaskdraftError, TaskdraftResult};

/// OpenAI-compatible API backend.
///
/// Works with Groq, OpenAI, OpenRouter, and any other provider that
/// implements the OpenAI chat completions API.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn build_messages(&self, messages: &[Message]) -> Vec<serde_json::Value> {
        messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": match m.role {
                        Role::System => "system",
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    "content": m.content
                })
            })
            .collect()
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter requires extra headers
        if matches!(self.config.provider, LlmProvider::OpenRouter) {
            request
                .header("HTTP-Referer", "https://github.com/taskdraft/taskdraft")
                .header("X-Title", "TaskDraft")
        } else {
            request
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, messages: &[Message]) -> TaskdraftResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let body = serde_json::json!({
            "model": self.config.model_id,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": self.build_messages(messages),
        });

        tracing::debug!(model = %self.config.model_id, messages = messages.len(), "requesting completion");

        let request = self.add_provider_headers(self.http.post(&url));
        let resp = request
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskdraftError::Service(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| TaskdraftError::Service(e.to_string()))?;

        if !status.is_success() {
            return Err(TaskdraftError::Service(format!(
                "API error {status}: {resp_body}"
            )));
        }

        parse_completion_response(&resp_body)
    }
}

pub(crate) fn parse_completion_response(body: &serde_json::Value) -> TaskdraftResult<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            TaskdraftError::Service("response contained no assistant message".to_string())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ModelConfig {
        ModelConfig {
            api_key: "test-key".to_string(),
            api_base_url: Some(server.uri()),
            ..ModelConfig::default()
        }
    }

    #[tokio::test]
    async fn sends_full_sequence_and_returns_assistant_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "system", "content": "be helpful"},
                    {"role": "user", "content": "add pagination"},
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Draft: ..."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(config_for(&server));
        let reply = backend
            .complete(&[Message::system("be helpful"), Message::user("add pagination")])
            .await
            .unwrap();
        assert_eq!(reply, "Draft: ...");
    }

    #[tokio::test]
    async fn api_error_surfaces_as_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "invalid api key"}
            })))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(config_for(&server));
        let err = backend
            .complete(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, TaskdraftError::Service(_)));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn malformed_response_is_a_service_error() {
        let err = parse_completion_response(&serde_json::json!({"choices": []})).unwrap_err();
        assert!(matches!(err, TaskdraftError::Service(_)));
    }
}
