//! TripTales Chat Assistant Layer
//!
//! A narrow chat proxy: questions about TripTales are forwarded to an
//! OpenAI-compatible completion service, anything else gets a canned refusal
//! without a network call.
//!
//! # Architecture
//!
//! - [`ScopeGuard`]: keyword and follow-up heuristic deciding what is in scope
//! - [`ChatHistory`]: client-supplied history, filtered to user/assistant turns
//! - [`ChatProvider`]: the completion backend seam
//!   - [`GroqProvider`]: OpenAI-compatible HTTP client, bounded by a timeout
//!   - [`MockProvider`]: deterministic responses for tests
//! - [`ChatAssistant`]: ties the above together
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use triptales_llm::{ChatAssistant, ChatHistory, MockProvider, BLOCKED_REPLY};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let assistant = ChatAssistant::new(Some(Arc::new(MockProvider::new("Day 1: Srinagar"))));
//!
//! let reply = assistant.respond("Plan a Kashmir trip", &ChatHistory::default()).await.unwrap();
//! assert_eq!(reply, "Day 1: Srinagar");
//!
//! let reply = assistant.respond("What is the capital of France?", &ChatHistory::default()).await.unwrap();
//! assert_eq!(reply, BLOCKED_REPLY);
//! # }
//! ```

#![warn(missing_docs)]

mod assistant;
mod config;
mod groq;
mod message;
mod mock;
mod prompt;
mod scope;

use thiserror::Error;

pub use assistant::{ChatAssistant, BLOCKED_REPLY};
pub use config::ChatConfig;
pub use groq::GroqProvider;
pub use message::{ChatHistory, ChatMessage, ChatProvider, ChatRole};
pub use mock::MockProvider;
pub use prompt::system_prompt;
pub use scope::ScopeGuard;

/// Errors that can occur while answering a chat message
#[derive(Error, Debug)]
pub enum LlmError {
    /// The message was blank after trimming
    #[error("Message is required.")]
    EmptyMessage,

    /// No provider is configured
    #[error("Missing GROQ_API_KEY in environment.")]
    MissingApiKey,

    /// The provider did not answer within the configured timeout
    #[error("Chat request timed out. Please try again.")]
    Timeout,

    /// The provider answered with a non-success status
    #[error("Chat provider request failed with status {status}")]
    Upstream {
        /// HTTP status returned by the provider
        status: u16,
        /// Response body, as text
        details: String,
    },

    /// The provider answered but the reply was blank
    #[error("No response generated.")]
    EmptyReply,

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider's response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
