//! Generic list controller: fetch a server-owned collection, mutate one
//! item, resynchronize.
//!
//! Every screen instantiates [`ResourceSync`] for its resource family. The
//! controller guarantees that after any locally-initiated mutation the list
//! reflects the mutation's server-side effect, by re-fetching rather than
//! patching locally: participant counts, vote tallies and badge status are
//! server-computed and not locally derivable with certainty. The cost is one
//! extra round trip per mutation, accepted because these are low-frequency
//! user actions.
//!
//! Staleness rules: refreshes carry a monotonically increasing sequence
//! number and only the most recently issued one may store its result; a
//! session epoch change (logout, re-login) while a request is in flight
//! discards the result entirely.

mod badges;
mod challenges;
mod feed;

pub use badges::{BadgeAction, BadgeFamily, BadgeSync};
pub use challenges::{ChallengeAction, ChallengeFamily, ChallengeSync};
pub use feed::{FeedFamily, FeedSync};

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::{AuthError, ClientError, ClientResult};
use crate::session::Session;

/// Lifecycle of a controller's list snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet.
    Idle,
    /// A refresh is in flight.
    Loading,
    /// `items` mirrors the server's last answer.
    Ready,
    /// The last refresh failed; `items` still holds the previous snapshot.
    Error,
}

/// Uninhabited action type for families whose items carry no mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}

/// Endpoint wiring for one resource family.
///
/// Implementations translate the controller's operations into `ApiClient`
/// calls; the token is handed in by the controller from a session snapshot
/// taken at issue time.
#[async_trait]
pub trait ResourceFamily: Send + Sync {
    type Item: Clone + Send + Sync;
    type Draft: Send + Sync;
    type Action: Send + Sync;

    /// Family name used in logs and duplicate-submit errors.
    fn name(&self) -> &'static str;

    /// Fetch the collection, in server order.
    async fn list(&self, api: &ApiClient, token: &str) -> ClientResult<Vec<Self::Item>>;

    /// Create a new resource. The created record is not returned: the
    /// follow-up refresh is what makes it visible.
    async fn create(&self, api: &ApiClient, token: &str, draft: &Self::Draft) -> ClientResult<()>;

    /// Mutate a single item.
    async fn mutate(
        &self,
        api: &ApiClient,
        token: &str,
        id: &str,
        action: &Self::Action,
    ) -> ClientResult<()>;

    /// Client-side pre-check against the current snapshot, run before a
    /// mutation request is issued. The server's rejection remains the
    /// authoritative failure path when the snapshot was stale.
    fn precheck(&self, _items: &[Self::Item], _id: &str, _action: &Self::Action) -> ClientResult<()> {
        Ok(())
    }
}

struct SyncState<T> {
    items: Vec<T>,
    phase: Phase,
    last_error: Option<ClientError>,
    issued_seq: u64,
    action_pending: bool,
}

impl<T> SyncState<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            phase: Phase::Idle,
            last_error: None,
            issued_seq: 0,
            action_pending: false,
        }
    }
}

/// List controller for one resource family. Created on screen mount,
/// dropped on unmount; never persisted.
pub struct ResourceSync<F: ResourceFamily> {
    family: F,
    session: Arc<Session>,
    state: Mutex<SyncState<F::Item>>,
}

impl<F: ResourceFamily> ResourceSync<F> {
    /// Create a controller bound to the given session.
    pub fn new(family: F, session: Arc<Session>) -> Self {
        Self {
            family,
            session,
            state: Mutex::new(SyncState::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyncState<F::Item>> {
        // Held for field access only, never across an await.
        self.state.lock().expect("sync state lock poisoned")
    }

    /// Current phase of the list snapshot.
    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    /// Snapshot of the items, in server order.
    pub fn items(&self) -> Vec<F::Item> {
        self.state().items.clone()
    }

    /// The captured error, present while `phase() == Phase::Error`.
    pub fn last_error(&self) -> Option<ClientError> {
        self.state().last_error.clone()
    }

    /// Whether a create/mutate submission is outstanding.
    pub fn is_action_pending(&self) -> bool {
        self.state().action_pending
    }

    /// Re-fetch the collection.
    ///
    /// Valid from any phase; re-entrant. Only the most recently issued
    /// refresh stores its result, and a failure keeps the previous `items`
    /// snapshot intact.
    pub async fn refresh(&self) -> ClientResult<()> {
        let snapshot = match self.session.auth_snapshot() {
            Ok(s) => s,
            Err(err) => {
                let mut st = self.state();
                st.phase = Phase::Error;
                st.last_error = Some(err.clone());
                return Err(err);
            }
        };

        let seq = {
            let mut st = self.state();
            st.issued_seq += 1;
            st.phase = Phase::Loading;
            st.issued_seq
        };

        let result = self.family.list(self.session.api(), &snapshot.token).await;

        if self.session.epoch() != snapshot.epoch {
            debug!(family = self.family.name(), "session changed during refresh; discarding result");
            let mut st = self.state();
            if seq == st.issued_seq {
                st.phase = Phase::Idle;
            }
            return Ok(());
        }

        match result {
            Ok(items) => {
                let mut st = self.state();
                if seq != st.issued_seq {
                    debug!(family = self.family.name(), "stale refresh result discarded");
                    return Ok(());
                }
                debug!(family = self.family.name(), count = items.len(), "list refreshed");
                st.items = items;
                st.phase = Phase::Ready;
                st.last_error = None;
                Ok(())
            }
            Err(err) => {
                {
                    let mut st = self.state();
                    if seq == st.issued_seq {
                        st.phase = Phase::Error;
                        st.last_error = Some(err.clone());
                    }
                }
                self.session.handle_auth_failure(&err);
                Err(err)
            }
        }
    }

    /// Create a new resource and refresh.
    ///
    /// Completion means "the list now reflects the new resource", not
    /// merely "the write succeeded". On failure the error is surfaced and
    /// no refresh is triggered.
    pub async fn create(&self, draft: &F::Draft) -> ClientResult<()> {
        let snapshot = self.session.auth_snapshot()?;
        self.begin_action("create")?;

        let result = self
            .family
            .create(self.session.api(), &snapshot.token, draft)
            .await;
        self.end_action();

        match result {
            Ok(()) => {
                if self.session.epoch() != snapshot.epoch {
                    debug!(family = self.family.name(), "session changed during create; discarding");
                    return Err(AuthError::Superseded.into());
                }
                self.refresh().await
            }
            Err(err) => {
                self.session.handle_auth_failure(&err);
                Err(err)
            }
        }
    }

    /// Mutate a single item and refresh.
    ///
    /// Runs the family's client-side pre-check against the current snapshot
    /// first, so an obviously invalid action (joining a full or ended
    /// challenge) fails without a round trip. A failed mutation never
    /// changes `items`.
    pub async fn mutate_item(&self, id: &str, action: &F::Action) -> ClientResult<()> {
        let snapshot = self.session.auth_snapshot()?;
        self.begin_action("mutate")?;

        let prechecked = {
            let st = self.state();
            self.family.precheck(&st.items, id, action)
        };
        if let Err(err) = prechecked {
            self.end_action();
            return Err(err);
        }

        let result = self
            .family
            .mutate(self.session.api(), &snapshot.token, id, action)
            .await;
        self.end_action();

        match result {
            Ok(()) => {
                if self.session.epoch() != snapshot.epoch {
                    debug!(family = self.family.name(), "session changed during mutation; discarding");
                    return Err(AuthError::Superseded.into());
                }
                self.refresh().await
            }
            Err(err) => {
                self.session.handle_auth_failure(&err);
                Err(err)
            }
        }
    }

    fn begin_action(&self, verb: &str) -> ClientResult<()> {
        let mut st = self.state();
        if st.action_pending {
            return Err(ClientError::ActionPending {
                operation: format!("{} {}", verb, self.family.name()),
            });
        }
        st.action_pending = true;
        Ok(())
    }

    fn end_action(&self) {
        self.state().action_pending = false;
    }
}
