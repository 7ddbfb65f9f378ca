//! Application configuration.
//!
//! One `taskdraft.toml` document loaded exactly once at startup. Recognized
//! options: `api_key` (optional — the `GROQ_API_KEY` environment variable
//! takes precedence, and a `.env` file is honored), `save_folder_path`, and
//! a `[model]` table. A missing config file triggers a one-time interactive
//! setup that writes a complete document; the file is never patched in
//! place.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taskdraft_core::{TaskdraftError, TaskdraftResult};
use taskdraft_llm::ModelConfig;

use crate::console::{is_exit, Console, Prompted};

/// Environment variable holding the completion-service credential.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Placeholder value shipped in `.env.example`; treated as unset.
const API_KEY_PLACEHOLDER: &str = "your_groq_api_key_here";

/// The loaded application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fallback credential when the environment variable is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Directory holding transcripts, the export catalog, and the session
    /// snapshot.
    #[serde(default = "default_save_folder")]
    pub save_folder_path: PathBuf,
    /// Completion-service settings.
    #[serde(default)]
    pub model: ModelConfig,
}

fn default_save_folder() -> PathBuf {
    PathBuf::from("./taskdraft_exports")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            save_folder_path: default_save_folder(),
            model: ModelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`, or runs the one-time interactive setup
    /// and writes a complete document there if none exists.
    pub fn load_or_init(
        path: &Path,
        console: &mut dyn Console,
    ) -> TaskdraftResult<Prompted<AppConfig>> {
        if path.exists() {
            let data = std::fs::read_to_string(path)?;
            let config = toml::from_str(&data).map_err(|e| {
                TaskdraftError::Config(format!("invalid config {}: {e}", path.display()))
            })?;
            return Ok(Prompted::Value(config));
        }

        console.line(&format!(
            "\nNo config found — creating {} now.",
            path.display()
        ));
        let default_folder = default_save_folder();
        let answer = console.read_line(&format!(
            "Folder for saved conversations [{}]: ",
            default_folder.display()
        ))?;
        let Some(answer) = answer else {
            return Ok(Prompted::Exit);
        };
        if is_exit(&answer) {
            return Ok(Prompted::Exit);
        }

        let config = AppConfig {
            save_folder_path: if answer.is_empty() {
                default_folder
            } else {
                PathBuf::from(answer)
            },
            ..AppConfig::default()
        };

        let doc = toml::to_string_pretty(&config)
            .map_err(|e| TaskdraftError::Config(e.to_string()))?;
        std::fs::write(path, doc)?;
        console.line(&format!("✓ Config written to {}", path.display()));
        Ok(Prompted::Value(config))
    }

    /// Resolves the completion-service credential: environment first, then
    /// the config file. Placeholder values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
            })
    }
}
