//! TripTales Gatekeeper
//!
//! Turns untyped submission payloads into validated itinerary drafts.
//!
//! The Gatekeeper provides:
//! - Text field normalization (trimmed, non-empty, length-bounded)
//! - Coordinate parsing and range checks, rounded to six decimals
//! - Proof photo decoding from a base64 `data:` URL with a size cap
//!
//! Validation is pure: nothing here touches storage.
//!
//! # Examples
//!
//! ```
//! use triptales_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let payload = serde_json::json!({
//!     "title": "Kashmir Trip",
//!     "route": "Srinagar-Gulmarg",
//!     "duration": "3 days",
//!     "budget": "15000",
//!     "highlights": "Snow, Gondola",
//!     "locationLatitude": 34.0837,
//!     "locationLongitude": 74.7973,
//!     "capturedPhotoDataUrl": "data:image/jpeg;base64,/9j/4AAQ"
//! });
//!
//! let draft = gatekeeper.validate(&payload).unwrap();
//! assert_eq!(draft.title, "Kashmir Trip");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod photo;
mod validator;

pub use config::ValidationConfig;
pub use error::ValidationError;
pub use photo::parse_photo_data_url;
pub use validator::{fields, Gatekeeper};
