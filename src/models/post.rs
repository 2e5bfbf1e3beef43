//! Feed post records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of contribution a post represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Idea,
    Action,
    Testimony,
    Challenge,
    Success,
}

/// Author snapshot embedded in each post by the list endpoint.
///
/// This is a denormalized copy taken at fetch time, not a live join; the
/// feed can render without extra lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostAuthor {
    pub id: String,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

/// A published post as returned by `GET /posts`.
///
/// The three counters are display-only in this client; no like/comment/share
/// mutation is exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user: Option<PostAuthor>,
    pub content: String,
    pub post_type: PostType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub shares_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /posts`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostDraft {
    pub content: String,
    pub post_type: PostType,
    pub tags: Vec<String>,
}

impl PostDraft {
    pub fn new(content: impl Into<String>, post_type: PostType) -> Self {
        Self {
            content: content.into(),
            post_type,
            tags: Vec::new(),
        }
    }

    /// Attach tags to the draft.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}
