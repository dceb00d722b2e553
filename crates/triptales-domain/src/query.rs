//! Listing criteria and result pages

use crate::itinerary::ItineraryRecord;
use crate::review::ReviewStatus;
use serde::{Deserialize, Serialize};

/// Page size used when no usable limit is given
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Largest page a caller may request
pub const MAX_LIST_LIMIT: usize = 200;

/// Query criteria for listing itineraries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItineraryQuery {
    /// Only return items in this status
    pub status: Option<ReviewStatus>,

    /// Maximum items to return (0..=MAX_LIST_LIMIT)
    pub limit: usize,
}

impl Default for ItineraryQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ItineraryQuery {
    /// Build a query from raw query-string values
    ///
    /// An unknown or empty status means "no filter". A limit that is missing,
    /// non-numeric, or not positive falls back to [`DEFAULT_LIST_LIMIT`].
    /// Other values are floored, so `0.5` yields an empty page, and capped at
    /// [`MAX_LIST_LIMIT`].
    pub fn from_params(status: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            status: status.and_then(ReviewStatus::parse),
            limit: parse_limit(limit),
        }
    }

    /// Whether a record passes the status filter
    pub fn matches(&self, record: &ItineraryRecord) -> bool {
        self.status.map_or(true, |s| record.review_status == s)
    }
}

fn parse_limit(raw: Option<&str>) -> usize {
    let Some(value) = raw.and_then(|s| s.trim().parse::<f64>().ok()) else {
        return DEFAULT_LIST_LIMIT;
    };
    if !value.is_finite() || value <= 0.0 {
        return DEFAULT_LIST_LIMIT;
    }
    (value.floor() as usize).min(MAX_LIST_LIMIT)
}

/// One page of listing results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryPage {
    /// Number of records matching the filter, before truncation
    pub total: usize,

    /// Matching records, newest first, at most `limit` of them
    pub items: Vec<ItineraryRecord>,
}
