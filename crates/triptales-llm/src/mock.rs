//! Mock provider for deterministic testing

use crate::message::{ChatMessage, ChatProvider};
use crate::LlmError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Timeout,
    Upstream(u16, String),
}

/// Mock chat provider that never touches the network
///
/// Replies are keyed by the content of the last message in the request; any
/// other request gets the default reply. Every call is recorded so tests can
/// inspect exactly what would have been sent upstream.
///
/// # Examples
///
/// ```
/// use triptales_llm::{ChatMessage, ChatProvider, MockProvider};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut provider = MockProvider::new("fallback");
/// provider.add_response("budget?", "INR 15,000");
///
/// let reply = provider.complete(&[ChatMessage::user("budget?")]).await.unwrap();
/// assert_eq!(reply, "INR 15,000");
/// assert_eq!(provider.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: String,
    scripted: Arc<Mutex<HashMap<String, Scripted>>>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockProvider {
    /// Create a provider that answers every request with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            default_reply: reply.into(),
            scripted: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn script(&mut self, message: impl Into<String>, outcome: Scripted) {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(message.into(), outcome);
    }

    /// Answer `message` with `reply`
    pub fn add_response(&mut self, message: impl Into<String>, reply: impl Into<String>) {
        self.script(message, Scripted::Reply(reply.into()));
    }

    /// Fail `message` with [`LlmError::Timeout`]
    pub fn add_timeout(&mut self, message: impl Into<String>) {
        self.script(message, Scripted::Timeout);
    }

    /// Fail `message` with [`LlmError::Upstream`]
    pub fn add_upstream_error(&mut self, message: impl Into<String>, status: u16, details: impl Into<String>) {
        self.script(message, Scripted::Upstream(status, details.into()));
    }

    /// Number of completed calls
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The messages sent with the most recent call
    pub fn last_request(&self) -> Option<Vec<ChatMessage>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(messages.to_vec());

        let key = messages.last().map(|m| m.content.as_str()).unwrap_or_default();
        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();

        match scripted {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Timeout) => Err(LlmError::Timeout),
            Some(Scripted::Upstream(status, details)) => Err(LlmError::Upstream { status, details }),
            None => Ok(self.default_reply.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
