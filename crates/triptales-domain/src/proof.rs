//! Proof module - evidence that the traveller was physically there

use crate::proximity::ProofVerification;
use serde::{Deserialize, Serialize};

/// Decimal places kept for stored coordinates (~0.11 m)
pub const COORDINATE_DECIMALS: i32 = 6;

/// Round a coordinate to [`COORDINATE_DECIMALS`] places
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    (value * factor).round() / factor
}

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in [-90, 90]
    pub latitude: f64,
    /// Longitude in [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rounding both axes to six decimals
    ///
    /// Range checks belong to the gatekeeper; this only normalizes precision.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: round_coordinate(latitude),
            longitude: round_coordinate(longitude),
        }
    }
}

/// Accepted proof photo formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    /// image/jpeg
    #[serde(rename = "image/jpeg", alias = "image/jpg")]
    Jpeg,
    /// image/png
    #[serde(rename = "image/png")]
    Png,
    /// image/webp
    #[serde(rename = "image/webp")]
    Webp,
}

impl ImageMime {
    /// MIME type string
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
            ImageMime::Webp => "image/webp",
        }
    }

    /// File extension used when the photo is written to disk
    pub fn extension(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "jpg",
            ImageMime::Png => "png",
            ImageMime::Webp => "webp",
        }
    }

    /// Parse a MIME type (case-insensitive); `image/jpg` is treated as JPEG
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            "image/webp" => Some(ImageMime::Webp),
            _ => None,
        }
    }
}

/// A decoded photo held in memory between validation and storage
#[derive(Clone, PartialEq)]
pub struct ProofImage {
    /// Declared image type
    pub mime: ImageMime,
    /// Decoded bytes (never empty)
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ProofImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofImage")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Stored photo metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofPhoto {
    /// Image type
    pub mime_type: ImageMime,
    /// Decoded size in bytes
    pub size_bytes: u64,
    /// Public path the serving layer resolves, e.g. `/uploads/itinerary-proofs/<id>.jpg`
    pub url: String,
}

/// Proof of travel embedded in every itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// Where the photo was captured
    pub location: GeoPoint,
    /// Stored photo
    pub photo: ProofPhoto,
    /// Advisory proximity check computed at submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<ProofVerification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_coordinate() {
        assert_eq!(round_coordinate(34.08370049), 34.0837);
        assert_eq!(round_coordinate(-74.1234567), -74.123457);
        assert_eq!(round_coordinate(0.0), 0.0);
    }

    #[test]
    fn test_geo_point_rounds() {
        let p = GeoPoint::new(12.34567891, -98.76543219);
        assert_eq!(p.latitude, 12.345679);
        assert_eq!(p.longitude, -98.765432);
    }

    #[test]
    fn test_mime_parse() {
        assert_eq!(ImageMime::parse("image/JPG"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::parse("image/png"), Some(ImageMime::Png));
        assert_eq!(ImageMime::parse("IMAGE/WEBP"), Some(ImageMime::Webp));
        assert_eq!(ImageMime::parse("image/gif"), None);
    }

    #[test]
    fn test_mime_extension() {
        assert_eq!(ImageMime::Jpeg.extension(), "jpg");
        assert_eq!(ImageMime::Png.extension(), "png");
        assert_eq!(ImageMime::Webp.extension(), "webp");
    }
}
