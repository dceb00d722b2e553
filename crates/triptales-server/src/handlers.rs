//! HTTP request handlers.
//!
//! Implements the itinerary, moderation, chat and health endpoints using axum.

use crate::config::ServerConfig;
use crate::error::ApiError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router as AxumRouter,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use triptales_domain::{
    ItineraryId, ItineraryQuery, ItineraryRecord, ProximityIndex, ReviewDecision, ReviewStatus,
};
use triptales_gatekeeper::Gatekeeper;
use triptales_llm::{ChatAssistant, ChatHistory};
use triptales_store::{ItineraryStore, ProofStorage};

/// Moderation settings needed per request
#[derive(Debug, Clone, Copy)]
pub struct ReviewSettings {
    /// Transition policy
    pub policy: triptales_domain::ReviewPolicy,
    /// Whether status updates need a bearer token
    pub require_bearer_token: bool,
    /// Characters kept from a note
    pub max_note_chars: usize,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: Arc<ItineraryStore>,
    /// Proof photo directory
    pub proofs: ProofStorage,
    /// Submission validator
    pub gatekeeper: Arc<Gatekeeper>,
    /// Reference places for proximity checks
    pub proximity: Arc<ProximityIndex>,
    /// Moderation settings
    pub review: ReviewSettings,
    /// Chat assistant
    pub assistant: Arc<ChatAssistant>,
    /// Public proof URL prefix
    pub public_proof_prefix: String,
    /// Largest accepted JSON body
    pub json_body_limit: usize,
    /// Browser key for `/api/public-config`
    pub google_maps_api_key: Option<String>,
}

impl AppState {
    /// Assemble state from configuration around an opened store and a chat assistant
    pub fn new(config: &ServerConfig, store: Arc<ItineraryStore>, assistant: ChatAssistant) -> Self {
        Self {
            store,
            proofs: ProofStorage::from_config(&config.store),
            gatekeeper: Arc::new(Gatekeeper::new(config.validation.clone())),
            proximity: Arc::new(config.proximity.index()),
            review: ReviewSettings {
                policy: config.review.policy(),
                require_bearer_token: config.review.require_bearer_token,
                max_note_chars: config.review.max_note_chars,
            },
            assistant: Arc::new(assistant),
            public_proof_prefix: config.store.public_proof_prefix.trim_end_matches('/').to_string(),
            json_body_limit: config.json_body_limit_bytes,
            google_maps_api_key: config.google_maps_api_key.clone(),
        }
    }

    /// Fill in proximity verification for records stored without one
    fn verified(&self, mut record: ItineraryRecord) -> ItineraryRecord {
        if record.proof.verification.is_none() {
            record.proof.verification =
                Some(self.proximity.verify(&record.route, record.proof.location));
        }
        record
    }

    /// Unwrap a JSON body; a request without a JSON content type counts as `{}`
    fn json_body(&self, body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
        match body {
            Ok(Json(value)) => Ok(value),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Default::default())),
            Err(rejection) => Err(ApiError::from_json_rejection(rejection, self.json_body_limit)),
        }
    }
}

/// Listing query parameters, kept as raw text so bad values fall back to defaults
#[derive(Debug, Default)]
pub struct ListParams {
    /// Status filter
    pub status: Option<String>,
    /// Page size
    pub limit: Option<String>,
}

impl ListParams {
    /// Collect parameters from raw query pairs
    ///
    /// A key given more than once has no single value and is treated as
    /// unusable, so it falls back to its default like any other bad value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let single = |key: &str| {
            let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);
            match (values.next(), values.next()) {
                (Some(value), None) => Some(value.clone()),
                _ => None,
            }
        };

        Self {
            status: single("status"),
            limit: single("limit"),
        }
    }
}

/// Listing response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Matching records before truncation
    pub total: usize,
    /// Newest-first page
    pub items: Vec<ItineraryRecord>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// "ok" or "unavailable"
    pub status: String,
    /// Stored itineraries, when the store is readable
    pub item_count: Option<usize>,
}

/// GET /api/itineraries - List itineraries, newest first
async fn list_itineraries(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let params = pairs
        .map(|Query(pairs)| ListParams::from_pairs(&pairs))
        .unwrap_or_default();
    let query = ItineraryQuery::from_params(params.status.as_deref(), params.limit.as_deref());
    let page = state
        .store
        .list(&query)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to read itineraries."))?;

    Ok(Json(ListResponse {
        total: page.total,
        items: page.items.into_iter().map(|r| state.verified(r)).collect(),
    }))
}

/// GET /api/itineraries/:id - Fetch one itinerary
async fn get_itinerary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // A malformed id cannot match any record
    let id = ItineraryId::parse(&id).map_err(|_| ApiError::not_found())?;

    let record = state
        .store
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch itinerary."))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(json!({ "itinerary": state.verified(record) })))
}

/// POST /api/itineraries - Validate, store the proof photo, append the record
async fn create_itinerary(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    const FALLBACK: &str = "Failed to create itinerary.";

    let payload = state.json_body(body)?;
    let draft = state.gatekeeper.validate(&payload)?;

    let id = ItineraryId::new();
    let photo_url = state
        .proofs
        .save(id, &draft.photo)
        .await
        .map_err(|e| ApiError::from_store(e, FALLBACK))?;

    let verification = state.proximity.verify(&draft.route, draft.location);
    let record = ItineraryRecord::from_draft(id, &draft, photo_url, Some(verification), Utc::now());

    let outcome = state
        .store
        .insert(record.clone())
        .await
        .map_err(|e| ApiError::from_store(e, FALLBACK))?;

    info!(
        %id,
        route = %record.route,
        within_radius = record.proof.verification.as_ref().map(|v| v.within_radius),
        evicted = outcome.evicted.len(),
        "Itinerary created"
    );

    let body = json!({
        "message": "Itinerary created successfully.",
        "itinerary": record,
    });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// PATCH /api/itineraries/:id/status - Record a moderator decision
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    if state.review.require_bearer_token && !has_bearer_token(&headers) {
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "A bearer token is required to review itineraries.",
        ));
    }

    let payload = state.json_body(body)?;

    // The target status is checked before any lookup
    let status = payload
        .get("reviewStatus")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .parse::<ReviewStatus>()
        .map_err(|msg| ApiError::new(StatusCode::BAD_REQUEST, msg))?;

    let note = match payload.get("reviewNote") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    };
    let decision = ReviewDecision::with_note_limit(status, note.as_deref(), state.review.max_note_chars);

    let id = ItineraryId::parse(&id).map_err(|_| ApiError::not_found())?;
    let record = state
        .store
        .update_review(id, decision, &state.review.policy, Utc::now())
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update itinerary status."))?;

    info!(%id, status = %record.review_status, "Itinerary reviewed");

    Ok(Json(json!({
        "message": "Itinerary review status updated.",
        "itinerary": state.verified(record),
    })))
}

fn has_bearer_token(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty())
}

/// POST /api/chat - Answer a TripTales question
async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = state.json_body(body)?;

    let message = match payload.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    };
    let history = payload
        .get("history")
        .map(ChatHistory::from_value)
        .unwrap_or_default();

    let reply = state
        .assistant
        .respond(&message, &history)
        .await
        .map_err(ApiError::from_chat)?;

    Ok(Json(json!({ "reply": reply })))
}

/// GET /api/public-config - Client-side keys
async fn public_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "googleMapsApiKey": state.google_maps_api_key }))
}

/// GET /health - Store readability check
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthCheckResponse>) {
    match state.store.count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthCheckResponse {
                status: "ok".to_string(),
                item_count: Some(count),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthCheckResponse {
                    status: "unavailable".to_string(),
                    item_count: None,
                }),
            )
        }
    }
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let proofs = ServeDir::new(state.proofs.dir());
    let prefix = state.public_proof_prefix.clone();
    let body_limit = state.json_body_limit;

    AxumRouter::new()
        .route("/api/itineraries", get(list_itineraries).post(create_itinerary))
        .route("/api/itineraries/:id", get(get_itinerary))
        .route("/api/itineraries/:id/status", patch(update_status))
        .route("/api/chat", post(chat))
        .route("/api/public-config", get(public_config))
        .route("/health", get(health_check))
        .nest_service(&prefix, proofs)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_list_params_from_pairs() {
        let params = ListParams::from_pairs(&pairs(&[("status", "approved"), ("limit", "5"), ("x", "1")]));
        assert_eq!(params.status.as_deref(), Some("approved"));
        assert_eq!(params.limit.as_deref(), Some("5"));

        let params = ListParams::from_pairs(&pairs(&[("limit", "1"), ("limit", "2"), ("status", "pending")]));
        assert_eq!(params.limit, None);
        assert_eq!(params.status.as_deref(), Some("pending"));

        let params = ListParams::from_pairs(&[]);
        assert!(params.status.is_none() && params.limit.is_none());
    }

    #[test]
    fn test_bearer_token_presence() {
        let mut headers = HeaderMap::new();
        assert!(!has_bearer_token(&headers));

        headers.insert(header::AUTHORIZATION, "Bearer   ".parse().unwrap());
        assert!(!has_bearer_token(&headers));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(!has_bearer_token(&headers));

        headers.insert(header::AUTHORIZATION, "Bearer moderator-token".parse().unwrap());
        assert!(has_bearer_token(&headers));
    }
}
