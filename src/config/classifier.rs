//! Primary classifier configuration

use serde::{Deserialize, Serialize};

/// Configuration for the primary tool-calling classifier.
///
/// The primary classifier is optional; when disabled (or when the API key
/// environment variable is unset) every message is classified by the
/// deterministic keyword fallback instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible chat-completions service
    pub url: String,
    pub model: String,
    /// Environment variable holding the API key; requests are sent without
    /// an Authorization header when unset
    pub api_key_env: Option<String>,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
    /// Low temperature keeps tool selection consistent across runs
    pub temperature: f32,
}

impl ClassifierConfig {
    /// Resolve the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            timeout_ms: 10_000,
            temperature: 0.1,
        }
    }
}
