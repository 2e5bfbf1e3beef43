//! Community challenge records and their join rules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default category used by the product for community challenges.
///
/// The server types `category` as an open string, so the client keeps it a
/// `String` rather than an enum; unknown categories coming back from the
/// server must not fail deserialization.
pub const DEFAULT_CATEGORY: &str = "innovation-socio-professionnelle";

const SECONDS_PER_DAY: i64 = 86_400;

/// A time-boxed community challenge as returned by `GET /challenges`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub rewards: Vec<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Challenge {
    /// Whole days remaining until the end date, rounded up.
    ///
    /// A challenge ending in ten seconds still has one day left; a challenge
    /// whose end date has passed reports zero or a negative count.
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        let secs = self.end_date.signed_duration_since(now).num_seconds();
        secs.div_euclid(SECONDS_PER_DAY)
            + if secs.rem_euclid(SECONDS_PER_DAY) > 0 { 1 } else { 0 }
    }

    /// Check whether the participant limit has been reached.
    pub fn is_full(&self) -> bool {
        match self.max_participants {
            Some(max) => self.participants.len() as u32 >= max,
            None => false,
        }
    }

    /// Check whether the given user already joined.
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// A challenge accepts new joins only while days remain and it is not
    /// full. The server re-checks both; this is the cheap pre-flight.
    pub fn accepts_joins(&self, now: DateTime<Utc>) -> bool {
        self.days_left(now) > 0 && !self.is_full()
    }
}

/// Payload for `POST /challenges`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChallengeDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    pub rewards: Vec<String>,
}

impl ChallengeDraft {
    /// The canned community challenge the product proposes when no
    /// challenge is active: thirty days, capped at one hundred
    /// participants, rewarding the three flagship badge types.
    pub fn default_community_challenge(now: DateTime<Utc>) -> Self {
        Self {
            title: "Innovation Socio-Professionnelle".to_string(),
            description: "Share an innovation, an idea or an action that contributes to \
                          professional and social development. A new way of working, a \
                          collaborative project, a mutual-aid initiative: show how you put \
                          the community's values into practice."
                .to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            start_date: now,
            end_date: now + Duration::days(30),
            max_participants: Some(100),
            rewards: vec![
                "innovation".to_string(),
                "collaboration".to_string(),
                "leadership".to_string(),
            ],
        }
    }
}
