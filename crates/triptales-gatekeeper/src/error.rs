//! Gatekeeper error types

use thiserror::Error;

/// Reasons a submission is refused
///
/// Every variant except [`ValidationError::PayloadTooLarge`] is a client-fixable
/// input error reported as a bad request. Messages name the offending field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field missing or blank after trimming
    #[error("{field} is required.")]
    Required {
        /// Payload field name
        field: &'static str,
    },

    /// Field longer than its limit
    #[error("{field} must be {max} characters or fewer.")]
    TooLong {
        /// Payload field name
        field: &'static str,
        /// Limit in characters
        max: usize,
    },

    /// Field is a list or object where text was expected
    #[error("{field} must be text.")]
    NotText {
        /// Payload field name
        field: &'static str,
    },

    /// Coordinate is not a finite number
    #[error("{field} must be a valid number.")]
    InvalidNumber {
        /// Payload field name
        field: &'static str,
    },

    /// Coordinate outside its geographic range
    #[error("{field} must be between {min} and {max}.")]
    OutOfRange {
        /// Payload field name
        field: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Proof photo is malformed, empty, or of an unsupported type
    #[error("{0}")]
    InvalidPhoto(String),

    /// Decoded proof photo exceeds the configured cap
    #[error("Captured photo exceeds {limit} bytes.")]
    PayloadTooLarge {
        /// Configured cap in bytes
        limit: usize,
        /// Decoded size in bytes
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the payload field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NotText { field }
            | ValidationError::InvalidNumber { field }
            | ValidationError::OutOfRange { field, .. } => field,
            ValidationError::InvalidPhoto(_) | ValidationError::PayloadTooLarge { .. } => {
                crate::fields::PHOTO
            }
        }
    }

    /// Whether the error is the oversized-photo case
    pub fn is_payload_too_large(&self) -> bool {
        matches!(self, ValidationError::PayloadTooLarge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_field() {
        assert_eq!(
            ValidationError::Required { field: "title" }.to_string(),
            "title is required."
        );
        assert_eq!(
            ValidationError::TooLong { field: "route", max: 220 }.to_string(),
            "route must be 220 characters or fewer."
        );
        assert_eq!(
            ValidationError::OutOfRange { field: "locationLatitude", min: -90.0, max: 90.0 }
                .to_string(),
            "locationLatitude must be between -90 and 90."
        );
    }

    #[test]
    fn test_field_and_kind() {
        let too_large = ValidationError::PayloadTooLarge { limit: 10, actual: 11 };
        assert!(too_large.is_payload_too_large());
        assert_eq!(too_large.field(), "capturedPhotoDataUrl");
        assert!(!ValidationError::NotText { field: "budget" }.is_payload_too_large());
    }
}
