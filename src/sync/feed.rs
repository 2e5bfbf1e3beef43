//! Feed wiring: the posts resource family.

use async_trait::async_trait;

use super::{NoAction, ResourceFamily, ResourceSync};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Post, PostDraft};

/// Controller type for the home feed.
pub type FeedSync = ResourceSync<FeedFamily>;

/// The posts family. Posts are created and listed; their like/comment/share
/// counters are display-only in this client, so there is no item action.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedFamily;

#[async_trait]
impl ResourceFamily for FeedFamily {
    type Item = Post;
    type Draft = PostDraft;
    type Action = NoAction;

    fn name(&self) -> &'static str {
        "posts"
    }

    async fn list(&self, api: &ApiClient, token: &str) -> ClientResult<Vec<Post>> {
        api.list_posts(token).await
    }

    async fn create(&self, api: &ApiClient, token: &str, draft: &PostDraft) -> ClientResult<()> {
        api.create_post(token, draft).await.map(|_| ())
    }

    async fn mutate(
        &self,
        _api: &ApiClient,
        _token: &str,
        _id: &str,
        action: &NoAction,
    ) -> ClientResult<()> {
        match *action {}
    }
}
