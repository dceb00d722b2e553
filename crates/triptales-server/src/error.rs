//! HTTP error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use triptales_gatekeeper::ValidationError;
use triptales_llm::LlmError;
use triptales_store::StoreError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Underlying cause for server-side failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An error ready to be sent to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    /// Create an error with a status and client-facing message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// HTTP status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// 404 for an unknown itinerary
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Itinerary not found.")
    }

    /// 413 for a request body over the configured limit
    pub fn body_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Request payload is too large. Limit is {} bytes.", limit),
        )
    }

    /// Map a JSON body rejection; `limit` is quoted in the 413 message
    pub fn from_json_rejection(rejection: JsonRejection, limit: usize) -> Self {
        let status = rejection.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            warn!(limit, "Rejected oversized request body");
            return Self::body_too_large(limit);
        }
        Self::new(status, rejection.body_text())
    }

    /// Map a store failure; `fallback` is the message shown for server faults
    pub fn from_store(err: StoreError, fallback: &str) -> Self {
        match err {
            StoreError::NotFound(_) => Self::not_found(),
            StoreError::Transition(e) => Self::new(StatusCode::CONFLICT, e.to_string()),
            other => {
                error!(error = %other, "{}", fallback);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback).with_details(other.to_string())
            }
        }
    }

    /// Map a chat failure
    pub fn from_chat(err: LlmError) -> Self {
        match err {
            LlmError::EmptyMessage => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            LlmError::Timeout => {
                warn!("Chat provider timed out");
                Self::new(StatusCode::GATEWAY_TIMEOUT, err.to_string())
            }
            LlmError::Upstream { status, details } => {
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                warn!(status = status.as_u16(), "Chat provider request failed");
                Self::new(status, "Chat provider request failed.").with_details(details)
            }
            LlmError::EmptyReply => Self::new(StatusCode::BAD_GATEWAY, err.to_string()),
            LlmError::MissingApiKey => {
                error!("Chat requested but no API key is configured");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            other => {
                error!(error = %other, "Failed to process chat request");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process chat request.")
                    .with_details(other.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let status = if err.is_payload_too_large() {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        warn!(field = err.field(), status = status.as_u16(), "Rejected submission: {}", err);
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
