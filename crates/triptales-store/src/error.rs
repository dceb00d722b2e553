//! Storage error types

use thiserror::Error;
use triptales_domain::{ItineraryId, TransitionError};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document exists but is not a list of itinerary records
    #[error("Itinerary data store is corrupted: {0}")]
    Corrupted(String),

    /// No record with this id
    #[error("Itinerary not found: {0}")]
    NotFound(ItineraryId),

    /// A record with this id already exists
    #[error("Duplicate itinerary id: {0}")]
    Duplicate(ItineraryId),

    /// The review policy refused a status change
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// File-system failure (disk full, permissions, ...)
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Records could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the error is the expected "no such record" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
