//! Badge wiring: showcase listing, nomination, community voting.

use async_trait::async_trait;

use super::{ResourceFamily, ResourceSync};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Badge, BadgeNomination};

/// Controller type for a user's badge showcase.
pub type BadgeSync = ResourceSync<BadgeFamily>;

/// Item actions on a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeAction {
    /// Cast a community vote on a pending nomination.
    Vote { approve: bool },
}

/// The badges family, scoped to one owner: the showcase always lists a
/// single user's badges. Status transitions (pending → validated/rejected)
/// are server-owned; the client nominates and votes, then re-fetches.
#[derive(Debug, Clone)]
pub struct BadgeFamily {
    user_id: String,
}

impl BadgeFamily {
    /// Create a family listing the given user's badges.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// The owner whose badges this family lists.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[async_trait]
impl ResourceFamily for BadgeFamily {
    type Item = Badge;
    type Draft = BadgeNomination;
    type Action = BadgeAction;

    fn name(&self) -> &'static str {
        "badges"
    }

    async fn list(&self, api: &ApiClient, token: &str) -> ClientResult<Vec<Badge>> {
        api.list_badges(token, &self.user_id).await
    }

    async fn create(
        &self,
        api: &ApiClient,
        token: &str,
        draft: &BadgeNomination,
    ) -> ClientResult<()> {
        api.nominate_badge(token, draft).await.map(|_| ())
    }

    async fn mutate(
        &self,
        api: &ApiClient,
        token: &str,
        id: &str,
        action: &BadgeAction,
    ) -> ClientResult<()> {
        match action {
            BadgeAction::Vote { approve } => api.vote_badge(token, id, *approve).await,
        }
    }
}
