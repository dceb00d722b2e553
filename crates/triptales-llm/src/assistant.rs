//! Chat assistant - scope check, prompt assembly, provider call

use crate::message::{ChatHistory, ChatMessage, ChatProvider, MAX_HISTORY_MESSAGES};
use crate::prompt::system_prompt;
use crate::scope::ScopeGuard;
use crate::LlmError;
use std::sync::Arc;
use tracing::{debug, info};

/// Reply given to anything outside the project's scope
pub const BLOCKED_REPLY: &str = "I can only help with TripTales project topics like Jammu and Kashmir itineraries, budgets, routes, features, and how to use this website.";

/// Answers chat messages about TripTales
#[derive(Clone)]
pub struct ChatAssistant {
    provider: Option<Arc<dyn ChatProvider>>,
    guard: ScopeGuard,
}

impl std::fmt::Debug for ChatAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAssistant")
            .field("provider", &self.provider.as_ref().map(|p| p.model_name()))
            .field("guard", &self.guard)
            .finish()
    }
}

impl ChatAssistant {
    /// Create an assistant; without a provider, in-scope questions fail
    /// with [`LlmError::MissingApiKey`]
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self {
            provider,
            guard: ScopeGuard::default(),
        }
    }

    /// Replace the scope guard
    pub fn with_guard(mut self, guard: ScopeGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Whether a provider is configured
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer one message in the context of `history`
    ///
    /// Out-of-scope messages get [`BLOCKED_REPLY`] without a provider call.
    pub async fn respond(&self, message: &str, history: &ChatHistory) -> Result<String, LlmError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LlmError::EmptyMessage);
        }

        if !self.guard.allows(message, history) {
            debug!("Chat message out of scope");
            return Ok(BLOCKED_REPLY.to_string());
        }

        let provider = self.provider.as_ref().ok_or(LlmError::MissingApiKey)?;

        let mut messages = Vec::with_capacity(history.turns().len().min(MAX_HISTORY_MESSAGES) + 2);
        messages.push(ChatMessage::system(system_prompt()));
        messages.extend(history.for_completion());
        messages.push(ChatMessage::user(message));

        let reply = provider.complete(&messages).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(LlmError::EmptyReply);
        }

        info!(model = provider.model_name(), chars = reply.len(), "Chat reply generated");
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatRole;
    use crate::mock::MockProvider;

    fn assistant(provider: &MockProvider) -> ChatAssistant {
        ChatAssistant::new(Some(Arc::new(provider.clone())))
    }

    #[tokio::test]
    async fn test_empty_message() {
        let provider = MockProvider::default();
        let result = assistant(&provider).respond("   ", &ChatHistory::default()).await;
        assert!(matches!(result, Err(LlmError::EmptyMessage)));
    }

    #[tokio::test]
    async fn test_out_of_scope_skips_provider() {
        let provider = MockProvider::default();
        let reply = assistant(&provider)
            .respond("Who won the football match?", &ChatHistory::default())
            .await
            .unwrap();

        assert_eq!(reply, BLOCKED_REPLY);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_request_layout() {
        let provider = MockProvider::new("  Day 1: Dal Lake  ");
        let history = ChatHistory::new([
            ChatMessage::user("I want a Srinagar trip"),
            ChatMessage::assistant("How many days?"),
        ]);

        let reply = assistant(&provider).respond(" 3 days trip ", &history).await.unwrap();
        assert_eq!(reply, "Day 1: Dal Lake");

        let sent = provider.last_request().unwrap();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].role, ChatRole::System);
        assert_eq!(sent[1].content, "I want a Srinagar trip");
        assert_eq!(sent[3], ChatMessage::user("3 days trip"));
    }

    #[tokio::test]
    async fn test_follow_up_reaches_provider() {
        let provider = MockProvider::new("Continuing the plan");
        let history = ChatHistory::new([ChatMessage::assistant("Shall I extend your Pahalgam itinerary?")]);

        let reply = assistant(&provider).respond("Sure!", &history).await.unwrap();
        assert_eq!(reply, "Continuing the plan");
    }

    #[tokio::test]
    async fn test_missing_provider() {
        let result = ChatAssistant::new(None)
            .respond("Kashmir budget?", &ChatHistory::default())
            .await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_out_of_scope_without_provider_still_refuses() {
        let reply = ChatAssistant::new(None)
            .respond("Tell me a joke", &ChatHistory::default())
            .await
            .unwrap();
        assert_eq!(reply, BLOCKED_REPLY);
    }

    #[tokio::test]
    async fn test_blank_reply() {
        let provider = MockProvider::new("   ");
        let result = assistant(&provider).respond("trip ideas", &ChatHistory::default()).await;
        assert!(matches!(result, Err(LlmError::EmptyReply)));
    }

    #[tokio::test]
    async fn test_provider_errors_propagate() {
        let mut provider = MockProvider::default();
        provider.add_timeout("slow trip");
        let result = assistant(&provider).respond("slow trip", &ChatHistory::default()).await;
        assert!(matches!(result, Err(LlmError::Timeout)));
    }
}
