use serde::{Deserialize, Serialize};

/// Supported completion-service providers. All speak the OpenAI chat
/// completions wire format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Groq cloud inference — the default, matching the free tier the tool
    /// was designed around.
    Groq,
    OpenAi,
    OpenRouter,
}

/// Model and generation parameters for the completion service.
///
/// Temperature and maximum output length are fixed constants chosen here,
/// not per-request knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which provider to talk to.
    #[serde(default = "default_provider")]
    pub provider: LlmProvider,
    /// Provider-side model identifier.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Bearer credential for the provider.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Overrides the provider's default API base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens in the completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_provider() -> LlmProvider {
    LlmProvider::Groq
}

fn default_model_id() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model_id: default_model_id(),
            api_key: String::new(),
            api_base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ModelConfig {
    /// The API base URL, honoring an explicit override.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::Groq => "https://api.groq.com/openai",
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
            }
        }
    }
}
