//! TripTales Server
//!
//! HTTP surface for itinerary submission, moderation and the chat assistant.
//!
//! # Endpoints
//!
//! - `GET /api/itineraries?status=&limit=` - newest-first listing
//! - `GET /api/itineraries/:id` - one itinerary
//! - `POST /api/itineraries` - submit an itinerary with proof photo
//! - `PATCH /api/itineraries/:id/status` - moderator decision
//! - `POST /api/chat` - TripTales assistant
//! - `GET /api/public-config` - client-side keys
//! - `GET /health` - store readability
//!
//! Proof photos are served from the configured public prefix.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod telemetry;

use config::{ConfigError, ServerConfig};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use triptales_janitor::JanitorWorker;
use triptales_llm::{ChatAssistant, ChatProvider, GroqProvider, LlmError};
use triptales_store::{ItineraryStore, ProofStorage, StoreError};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Chat provider could not be created
    #[error("Chat provider error: {0}")]
    Chat(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the chat assistant; without an API key chat requests fail with 500
pub fn build_assistant(config: &ServerConfig) -> Result<ChatAssistant, ServerError> {
    if config.chat.api_key().is_none() {
        warn!("No chat API key configured; /api/chat will only answer out-of-scope questions");
        return Ok(ChatAssistant::new(None));
    }
    let provider: Arc<dyn ChatProvider> = Arc::new(GroqProvider::from_config(&config.chat)?);
    Ok(ChatAssistant::new(Some(provider)))
}

/// Open the store and assemble the application state
pub async fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let store = Arc::new(ItineraryStore::open(&config.store).await?);
    let assistant = build_assistant(config)?;
    Ok(AppState::new(config, store, assistant))
}

/// Start the HTTP server
///
/// Validates configuration, opens the store, starts the janitor worker (when
/// enabled) and serves until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting TripTales server");
    info!("Bind address: {}", config.bind_addr());
    info!("Itinerary document: {}", config.store.document_path().display());
    info!("Proof directory: {}", config.store.proof_dir.display());
    info!("Max items: {}", config.store.max_items);
    info!("Chat model: {} (timeout {:?})", config.chat.model, config.chat.timeout());

    let state = build_state(&config).await?;

    if config.janitor.enabled {
        let mut worker = JanitorWorker::new(config.janitor.clone());
        let store = Arc::clone(&state.store);
        let proofs = ProofStorage::from_config(&config.store);
        tokio::spawn(async move {
            if let Err(e) = worker.run(store, proofs).await {
                tracing::error!("Janitor worker stopped: {}", e);
            }
        });
    }

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("TripTales server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_without_key() {
        let assistant = build_assistant(&ServerConfig::default()).unwrap();
        assert!(!assistant.is_available());
    }

    #[test]
    fn test_assistant_with_key() {
        let mut config = ServerConfig::default();
        config.chat.api_key = Some("gsk_test".to_string());
        let assistant = build_assistant(&config).unwrap();
        assert!(assistant.is_available());
    }

    #[tokio::test]
    async fn test_start_server_rejects_invalid_config() {
        let mut config = ServerConfig::default();
        config.bind_port = 0;
        let result = start_server(config).await;
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
