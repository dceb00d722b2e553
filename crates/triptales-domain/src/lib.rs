//! TripTales Domain Layer
//!
//! This crate contains the core model for the itinerary submission and
//! moderation pipeline. It performs no I/O: storage, validation of untyped
//! input, and HTTP live in other crates and depend on the types defined here.
//!
//! ## Key Concepts
//!
//! - **Itinerary**: a traveller's plan (title, route, duration, budget, highlights)
//! - **Proof**: geolocation plus a stored photo attached to every submission
//! - **Review status**: moderation state (`pending` → `approved` / `rejected`)
//! - **Proximity verification**: advisory distance between the proof location
//!   and the places named in the route
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Constructors enforce invariants; illegal review states are unrepresentable
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod itinerary;
pub mod proof;
pub mod proximity;
pub mod query;
pub mod review;

// Re-exports for convenience
pub use itinerary::{ItineraryDraft, ItineraryId, ItineraryRecord};
pub use proof::{GeoPoint, ImageMime, Proof, ProofImage, ProofPhoto};
pub use proximity::{ProofVerification, ProximityIndex, RoutePoint};
pub use query::{ItineraryPage, ItineraryQuery};
pub use review::{ReviewDecision, ReviewPolicy, ReviewStatus, TransitionError};
