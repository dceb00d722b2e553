//! Completion provider configuration

use serde::Deserialize;
use std::time::Duration;

/// Groq's OpenAI-compatible API root
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default completion model
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 16;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Settings for the chat completion provider
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// API root; `/chat/completions` is appended
    pub endpoint: String,

    /// Model name sent with every request
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Request timeout in milliseconds; takes precedence over `timeout_secs`
    pub timeout_ms: Option<u64>,

    /// Sampling temperature
    pub temperature: f32,

    /// Bearer token; chat is unavailable without one
    pub api_key: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timeout_ms: None,
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout())
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ChatConfig {
    /// Effective request timeout
    pub fn timeout(&self) -> Duration {
        match self.timeout_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_secs(self.timeout_secs),
        }
    }

    /// The API key, if set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout().is_zero() {
            return Err("chat timeout must be greater than 0".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("chat model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("chat temperature must be between 0 and 2".to_string());
        }
        Ok(())
    }
}
