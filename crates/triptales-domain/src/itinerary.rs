//! Itinerary module - the unit of persistence

use crate::proof::{GeoPoint, Proof, ProofImage, ProofPhoto};
use crate::proximity::ProofVerification;
use crate::review::ReviewStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an itinerary based on UUIDv7
///
/// Generated server-side when a submission is accepted and never reused.
/// UUIDv7 keeps identifiers roughly sortable by creation time, which makes
/// proof file names in the upload directory easy to eyeball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItineraryId(u128);

impl ItineraryId {
    /// Generate a new UUIDv7-based ItineraryId
    ///
    /// # Examples
    ///
    /// ```
    /// use triptales_domain::ItineraryId;
    ///
    /// let id = ItineraryId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an ItineraryId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an ItineraryId from its UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use triptales_domain::ItineraryId;
    ///
    /// let id = ItineraryId::new();
    /// let parsed = ItineraryId::parse(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid itinerary id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ItineraryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItineraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl FromStr for ItineraryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ItineraryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItineraryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A fully validated submission, not yet persisted
///
/// Produced by the gatekeeper. Every text field is trimmed and within its
/// length bound, the location is rounded to six decimals, and the photo has
/// been decoded and size-checked. There is no way to build a partially valid
/// draft outside of validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDraft {
    /// Itinerary title
    pub title: String,
    /// Route description, e.g. "Srinagar - Gulmarg"
    pub route: String,
    /// Duration, free text
    pub duration: String,
    /// Budget, free text
    pub budget: String,
    /// Highlights, free text
    pub highlights: String,
    /// Where the proof photo was captured
    pub location: GeoPoint,
    /// Decoded proof photo
    pub photo: ProofImage,
}

/// A persisted itinerary
///
/// Serialized in camelCase; this is both the on-disk document shape and the
/// shape returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRecord {
    /// Unique identifier (immutable)
    pub id: ItineraryId,

    /// Itinerary title
    pub title: String,

    /// Route description
    pub route: String,

    /// Duration, free text
    pub duration: String,

    /// Budget, free text
    pub budget: String,

    /// Highlights, free text
    pub highlights: String,

    /// Moderation state
    #[serde(default)]
    pub review_status: ReviewStatus,

    /// When the itinerary was submitted (immutable)
    pub created_at: DateTime<Utc>,

    /// When the review status last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Moderator note, absent when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,

    /// Proof of travel
    pub proof: Proof,
}

impl ItineraryRecord {
    /// Build a pending record from a validated draft and the stored photo URL
    pub fn from_draft(
        id: ItineraryId,
        draft: &ItineraryDraft,
        photo_url: String,
        verification: Option<ProofVerification>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            route: draft.route.clone(),
            duration: draft.duration.clone(),
            budget: draft.budget.clone(),
            highlights: draft.highlights.clone(),
            review_status: ReviewStatus::Pending,
            created_at,
            reviewed_at: None,
            review_note: None,
            proof: Proof {
                location: draft.location,
                photo: ProofPhoto {
                    mime_type: draft.photo.mime,
                    size_bytes: draft.photo.bytes.len() as u64,
                    url: photo_url,
                },
                verification,
            },
        }
    }

    /// File name of the proof photo, taken from the last segment of its URL
    pub fn proof_file_name(&self) -> Option<&str> {
        self.proof
            .photo
            .url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }
}
