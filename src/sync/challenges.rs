//! Challenge wiring: list, propose, join.

use async_trait::async_trait;
use chrono::Utc;

use super::{ResourceFamily, ResourceSync};
use crate::api::ApiClient;
use crate::error::{ApiError, ClientResult};
use crate::models::{Challenge, ChallengeDraft};

/// Controller type for the challenges screen.
pub type ChallengeSync = ResourceSync<ChallengeFamily>;

/// Item actions on a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeAction {
    /// Enroll the current user as a participant.
    Join,
}

/// The challenges family.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChallengeFamily;

#[async_trait]
impl ResourceFamily for ChallengeFamily {
    type Item = Challenge;
    type Draft = ChallengeDraft;
    type Action = ChallengeAction;

    fn name(&self) -> &'static str {
        "challenges"
    }

    async fn list(&self, api: &ApiClient, token: &str) -> ClientResult<Vec<Challenge>> {
        api.list_challenges(token).await
    }

    async fn create(
        &self,
        api: &ApiClient,
        token: &str,
        draft: &ChallengeDraft,
    ) -> ClientResult<()> {
        api.create_challenge(token, draft).await.map(|_| ())
    }

    async fn mutate(
        &self,
        api: &ApiClient,
        token: &str,
        id: &str,
        action: &ChallengeAction,
    ) -> ClientResult<()> {
        match action {
            ChallengeAction::Join => api.join_challenge(token, id).await,
        }
    }

    /// Capacity and end-date are checked against the current snapshot
    /// before spending a round trip. An id missing from the snapshot is
    /// passed through: the list may simply be stale, and the server's
    /// verdict is authoritative either way.
    fn precheck(&self, items: &[Challenge], id: &str, action: &ChallengeAction) -> ClientResult<()> {
        let ChallengeAction::Join = action;
        if let Some(challenge) = items.iter().find(|c| c.id == id) {
            if challenge.days_left(Utc::now()) <= 0 {
                return Err(ApiError::ChallengeClosed.into());
            }
            if challenge.is_full() {
                return Err(ApiError::ChallengeFull.into());
            }
        }
        Ok(())
    }
}
