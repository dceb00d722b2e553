//! OpenAI-compatible completion provider (Groq by default)
//!
//! One request per call, aborted after the configured timeout. Failures are
//! surfaced as-is; there is no retry.

use crate::config::ChatConfig;
use crate::message::{ChatMessage, ChatProvider};
use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Chat provider speaking the OpenAI `chat/completions` protocol
#[derive(Debug, Clone)]
pub struct GroqProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// [`LlmError::MissingApiKey`] when no key is configured, or
    /// [`LlmError::Communication`] when the HTTP client cannot be built.
    pub fn from_config(config: &ChatConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key().ok_or(LlmError::MissingApiKey)?.to_string();

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

fn extract_reply(response: CompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages,
        };

        debug!(model = %self.model, messages = messages.len(), "Sending chat completion");
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Chat provider returned an error");
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(extract_reply(parsed).unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}
