//! Submission validation logic

use crate::photo::parse_photo_data_url;
use crate::{ValidationConfig, ValidationError};
use serde_json::Value;
use triptales_domain::{GeoPoint, ItineraryDraft};

/// Payload field names as they appear on the wire
pub mod fields {
    /// Itinerary title
    pub const TITLE: &str = "title";
    /// Route description
    pub const ROUTE: &str = "route";
    /// Duration text
    pub const DURATION: &str = "duration";
    /// Budget text
    pub const BUDGET: &str = "budget";
    /// Highlights text
    pub const HIGHLIGHTS: &str = "highlights";
    /// Proof latitude
    pub const LATITUDE: &str = "locationLatitude";
    /// Proof longitude
    pub const LONGITUDE: &str = "locationLongitude";
    /// Proof photo data URL
    pub const PHOTO: &str = "capturedPhotoDataUrl";
}

/// The Gatekeeper validates submissions before anything is stored
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active limits
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate an untyped submission payload
    ///
    /// The photo is checked first so an oversized upload is always reported
    /// as too large, whatever else is wrong with the payload. Remaining
    /// fields are checked in wire order and the first failure is returned.
    pub fn validate(&self, payload: &Value) -> Result<ItineraryDraft, ValidationError> {
        let photo_raw = text_of(payload, fields::PHOTO)?;
        let photo = parse_photo_data_url(&photo_raw, self.config.max_image_bytes)?;

        let title = self.text(payload, fields::TITLE, self.config.title_max_chars)?;
        let route = self.text(payload, fields::ROUTE, self.config.route_max_chars)?;
        let duration = self.text(payload, fields::DURATION, self.config.duration_max_chars)?;
        let budget = self.text(payload, fields::BUDGET, self.config.budget_max_chars)?;
        let highlights = self.text(payload, fields::HIGHLIGHTS, self.config.highlights_max_chars)?;

        let latitude = coordinate(payload, fields::LATITUDE, -90.0, 90.0)?;
        let longitude = coordinate(payload, fields::LONGITUDE, -180.0, 180.0)?;

        Ok(ItineraryDraft {
            title,
            route,
            duration,
            budget,
            highlights,
            location: GeoPoint::new(latitude, longitude),
            photo,
        })
    }

    fn text(&self, payload: &Value, field: &'static str, max: usize) -> Result<String, ValidationError> {
        let value = text_of(payload, field)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required { field });
        }
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
        Ok(trimmed.to_string())
    }
}

/// Read a field as text; scalars are stringified, missing/null is empty
fn text_of(payload: &Value, field: &'static str) -> Result<String, ValidationError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(ValidationError::NotText { field }),
    }
}

/// Parse a coordinate from a JSON number or numeric string and range-check it
fn coordinate(payload: &Value, field: &'static str, min: f64, max: f64) -> Result<f64, ValidationError> {
    let value = match payload.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .ok_or(ValidationError::InvalidNumber { field })?;

    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(value)
}
