//! User profile records and the partial-update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned by `GET /users/me` and the
/// auth exchange endpoints.
///
/// `soft_skills` carries set semantics with insertion order preserved;
/// `badges` holds the validated badge-type tags and is server-owned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub personal_values: Vec<String>,
    #[serde(default)]
    pub engagements: Vec<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub posts_count: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Check whether the profile lists the given soft skill.
    ///
    /// Matching is exact: the product treats skill names as canonical
    /// strings chosen from a fixed palette.
    pub fn has_skill(&self, name: &str) -> bool {
        self.soft_skills.iter().any(|s| s == name)
    }
}

/// Partial profile update for `PUT /users/me`.
///
/// Only the set fields are serialized; the server applies them and returns
/// the authoritative full profile.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagements: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Check whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.bio.is_none()
            && self.job_title.is_none()
            && self.location.is_none()
            && self.soft_skills.is_none()
            && self.personal_values.is_none()
            && self.engagements.is_none()
    }
}

/// Registration fields for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Response of the credential exchange endpoints
/// (`POST /auth/login`, `POST /auth/register`).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthExchange {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: UserProfile,
}
