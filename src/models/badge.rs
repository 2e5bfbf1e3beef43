//! Peer-nominated badge records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed taxonomy of soft-skill badges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeType {
    Empathy,
    Leadership,
    Resilience,
    Creativity,
    Communication,
    Collaboration,
    Innovation,
}

/// Community-validation state of a badge. Transitions are server-owned; the
/// client only displays the current state and vote tallies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStatus {
    Pending,
    Validated,
    Rejected,
}

/// A badge nomination and its voting record, as returned by `GET /badges`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    pub id: String,
    pub user_id: String,
    pub badge_type: BadgeType,
    pub title: String,
    pub description: String,
    pub status: BadgeStatus,
    #[serde(default)]
    pub awarded_by: Option<String>,
    #[serde(default)]
    pub evidence_url: Option<String>,
    #[serde(default)]
    pub votes_for: u32,
    #[serde(default)]
    pub votes_against: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub validated_at: Option<DateTime<Utc>>,
}

impl Badge {
    /// A badge still collecting community votes.
    pub fn is_pending(&self) -> bool {
        self.status == BadgeStatus::Pending
    }
}

/// Payload for `POST /badges`: nominate a user for a badge.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BadgeNomination {
    pub user_id: String,
    pub badge_type: BadgeType,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
}
