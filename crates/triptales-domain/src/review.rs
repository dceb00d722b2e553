//! Review module - the moderation lifecycle of an itinerary

use crate::itinerary::ItineraryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum stored length of a moderator note, in characters
pub const MAX_REVIEW_NOTE_CHARS: usize = 500;

/// Moderation state of an itinerary
///
/// Every record starts as `Pending`. Moderators move it to `Approved` or
/// `Rejected`; whether it may leave those states again is governed by
/// [`ReviewPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting moderation
    #[default]
    Pending,

    /// Accepted by a moderator
    Approved,

    /// Declined by a moderator
    Rejected,
}

impl ReviewStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Parse a status, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    /// Whether a moderator has decided on the item
    pub fn is_decided(&self) -> bool {
        !matches!(self, ReviewStatus::Pending)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| "reviewStatus must be one of: pending, approved, rejected.".to_string())
    }
}

/// Rules applied when a moderator changes a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPolicy {
    /// Allow moving an item out of `approved`/`rejected` once decided
    pub allow_re_review: bool,
}

impl Default for ReviewPolicy {
    /// Any transition is allowed, including approved ↔ rejected
    fn default() -> Self {
        Self {
            allow_re_review: true,
        }
    }
}

impl ReviewPolicy {
    /// Decisions are final: decided items can only be re-confirmed
    pub fn final_decisions() -> Self {
        Self {
            allow_re_review: false,
        }
    }

    /// Check whether `from → to` is permitted
    pub fn check(&self, from: ReviewStatus, to: ReviewStatus) -> Result<(), TransitionError> {
        if from == to || self.allow_re_review || !from.is_decided() {
            Ok(())
        } else {
            Err(TransitionError { from, to })
        }
    }
}

/// A transition refused by the active [`ReviewPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    /// Current status
    pub from: ReviewStatus,
    /// Requested status
    pub to: ReviewStatus,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Itinerary is already {} and cannot be moved to {}.",
            self.from, self.to
        )
    }
}

impl std::error::Error for TransitionError {}

/// A moderator's decision: target status plus an optional note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDecision {
    /// Target status
    pub status: ReviewStatus,
    /// Normalized note; `None` clears any existing note
    pub note: Option<String>,
}

impl ReviewDecision {
    /// Build a decision, trimming the note, truncating it to
    /// [`MAX_REVIEW_NOTE_CHARS`] and dropping it when empty
    pub fn new(status: ReviewStatus, note: Option<&str>) -> Self {
        Self::with_note_limit(status, note, MAX_REVIEW_NOTE_CHARS)
    }

    /// Like [`ReviewDecision::new`] with a custom note length cap
    pub fn with_note_limit(status: ReviewStatus, note: Option<&str>, max_chars: usize) -> Self {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| n.chars().take(max_chars).collect::<String>())
            .filter(|n| !n.is_empty());

        Self { status, note }
    }
}

impl ItineraryRecord {
    /// Apply a moderator decision
    ///
    /// Sets the status, stamps `reviewed_at`, and replaces or clears the note.
    /// The record is left untouched when the policy refuses the transition.
    pub fn apply_review(
        &mut self,
        decision: ReviewDecision,
        policy: &ReviewPolicy,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        policy.check(self.review_status, decision.status)?;

        self.review_status = decision.status;
        self.reviewed_at = Some(now);
        self.review_note = decision.note;
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every status survives a trip through its string form
        #[test]
        fn test_status_string_roundtrip(idx in 0usize..3, upper: bool) {
            let status = ReviewStatus::ALL[idx];
            let text = if upper { status.as_str().to_uppercase() } else { status.as_str().to_string() };
            prop_assert_eq!(ReviewStatus::parse(&text), Some(status));
        }
    }
}
