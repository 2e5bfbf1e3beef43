//! Session lifecycle: the single source of truth for "who is logged in."
//!
//! `Session` owns the bearer credential and the current-user identity.
//! Every authorized request in the crate derives its token from here at
//! call time, so a logout can never leak a stale header into a request
//! issued afterwards. An epoch counter is bumped on every auth transition;
//! requests that were in flight across a transition have their results
//! disregarded when they land.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::{AuthError, ClientError, ClientResult};
use crate::models::{AuthExchange, ProfileUpdate, Registration, UserProfile};
use crate::traits::CredentialStore;

/// Authentication state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No credential; the login/register view gates everything else.
    Unauthenticated,
    /// A persisted credential is being resolved against `GET /users/me`.
    Resolving,
    /// Identity resolved; `current_user` is present.
    Authenticated,
}

/// Token + epoch pair captured at the moment a request is issued.
///
/// The epoch lets the caller detect that the session changed while the
/// request was in flight and discard the result.
#[derive(Debug, Clone)]
pub(crate) struct AuthSnapshot {
    pub token: String,
    pub epoch: u64,
}

#[derive(Debug)]
struct SessionState {
    token: Option<String>,
    current_user: Option<UserProfile>,
    status: SessionStatus,
    epoch: u64,
    auth_pending: bool,
    profile_pending: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            token: None,
            current_user: None,
            status: SessionStatus::Unauthenticated,
            epoch: 0,
            auth_pending: false,
            profile_pending: false,
        }
    }

    /// Drop credential and identity in one step. Bumping the epoch is what
    /// invalidates every request still in flight.
    fn reset(&mut self) {
        self.token = None;
        self.current_user = None;
        self.status = SessionStatus::Unauthenticated;
        self.epoch += 1;
    }
}

/// The process-wide session, constructed once and shared by reference with
/// every screen controller.
pub struct Session {
    api: ApiClient,
    store: Box<dyn CredentialStore>,
    state: Mutex<SessionState>,
}

impl Session {
    /// Create a new session. It starts unauthenticated; call
    /// [`Session::initialize`] to restore a persisted credential.
    pub fn new(api: ApiClient, store: Box<dyn CredentialStore>) -> Self {
        Self {
            api,
            store,
            state: Mutex::new(SessionState::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // The lock is only ever held for field access, never across an
        // await, so poisoning can only follow a panic elsewhere.
        self.state.lock().expect("session state lock poisoned")
    }

    /// Current authentication status.
    pub fn status(&self) -> SessionStatus {
        self.state().status
    }

    /// Check whether an identity is established.
    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    /// Snapshot of the authenticated user's profile, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state().current_user.clone()
    }

    /// The API client used for all requests.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.state().epoch
    }

    /// Capture the current token and epoch for an authorized request.
    pub(crate) fn auth_snapshot(&self) -> ClientResult<AuthSnapshot> {
        let st = self.state();
        match &st.token {
            Some(token) => Ok(AuthSnapshot {
                token: token.clone(),
                epoch: st.epoch,
            }),
            None => Err(AuthError::NotAuthenticated.into()),
        }
    }

    /// Forced logout on an expired/revoked token, from whichever component
    /// observed the unauthorized response.
    pub(crate) fn handle_auth_failure(&self, err: &ClientError) {
        if err.requires_reauth() {
            warn!(code = err.error_code(), "authorized request rejected; signing out");
            self.logout();
        }
    }

    /// Restore a persisted credential, if one exists, and resolve the
    /// identity behind it.
    ///
    /// Always terminates in `Unauthenticated` or `Authenticated` — never in
    /// `Resolving` — so the view layer can gate rendering on the returned
    /// status. Any resolve failure (network, unauthorized, malformed
    /// response) discards the persisted credential.
    pub async fn initialize(&self) -> SessionStatus {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "could not read credential store");
                None
            }
        };

        let Some(token) = stored else {
            self.state().status = SessionStatus::Unauthenticated;
            debug!("no persisted credential; starting unauthenticated");
            return SessionStatus::Unauthenticated;
        };

        let epoch = {
            let mut st = self.state();
            st.token = Some(token.clone());
            st.status = SessionStatus::Resolving;
            st.epoch
        };

        match self.api.fetch_me(&token).await {
            Ok(user) => {
                let mut st = self.state();
                if st.epoch != epoch {
                    debug!("session changed during startup resolve; discarding result");
                    return st.status;
                }
                info!(user_id = %user.id, "restored session from persisted credential");
                st.current_user = Some(user);
                st.status = SessionStatus::Authenticated;
                SessionStatus::Authenticated
            }
            Err(err) => {
                let (should_clear, status) = {
                    let mut st = self.state();
                    if st.epoch == epoch {
                        st.reset();
                        (true, SessionStatus::Unauthenticated)
                    } else {
                        (false, st.status)
                    }
                };
                if should_clear {
                    if let Err(e) = self.store.clear() {
                        warn!(error = %e, "could not clear rejected credential");
                    }
                    warn!(
                        code = err.error_code(),
                        "persisted credential rejected; starting unauthenticated"
                    );
                }
                status
            }
        }
    }

    /// Exchange email and password for an authenticated session.
    ///
    /// On failure the session is left unchanged and the error carries a
    /// user-displayable message (the server's `detail` when present).
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserProfile> {
        let epoch = self.begin_auth_exchange()?;
        let result = self.api.login(email, password).await;
        self.finish_auth_exchange(result, epoch, "login")
    }

    /// Register a new account. Success semantics are identical to
    /// [`Session::login`]: registration implies immediate authentication.
    pub async fn register(&self, registration: &Registration) -> ClientResult<UserProfile> {
        let epoch = self.begin_auth_exchange()?;
        let result = self.api.register(registration).await;
        self.finish_auth_exchange(result, epoch, "register")
    }

    fn begin_auth_exchange(&self) -> ClientResult<u64> {
        let mut st = self.state();
        if st.auth_pending {
            return Err(ClientError::ActionPending {
                operation: "sign in".to_string(),
            });
        }
        st.auth_pending = true;
        Ok(st.epoch)
    }

    fn finish_auth_exchange(
        &self,
        result: ClientResult<AuthExchange>,
        epoch: u64,
        operation: &str,
    ) -> ClientResult<UserProfile> {
        match result {
            Ok(exchange) => {
                let applied = {
                    let mut st = self.state();
                    st.auth_pending = false;
                    if st.epoch != epoch {
                        false
                    } else {
                        st.token = Some(exchange.access_token.clone());
                        st.current_user = Some(exchange.user.clone());
                        st.status = SessionStatus::Authenticated;
                        st.epoch += 1;
                        true
                    }
                };
                if !applied {
                    debug!("session changed during {}; discarding exchanged credential", operation);
                    return Err(AuthError::Superseded.into());
                }
                if let Err(e) = self.store.save(&exchange.access_token) {
                    warn!(error = %e, "could not persist credential; session remains in-memory only");
                }
                info!(user_id = %exchange.user.id, "{} succeeded", operation);
                Ok(exchange.user)
            }
            Err(err) => {
                self.state().auth_pending = false;
                warn!(code = err.error_code(), "{} failed", operation);
                Err(err)
            }
        }
    }

    /// Discard the credential and identity. Synchronous and callable at any
    /// time; requests already in flight complete but their results are
    /// disregarded because the epoch has moved on.
    pub fn logout(&self) {
        self.state().reset();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear persisted credential");
        }
        info!("signed out");
    }

    /// Apply a partial update to the current user's profile.
    ///
    /// The server's returned representation replaces `current_user`
    /// wholesale — never a client-side merge — because server-computed
    /// counters and badge state may differ from what was sent.
    pub async fn update_current_user(&self, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        let snapshot = self.auth_snapshot()?;
        {
            let mut st = self.state();
            if st.profile_pending {
                return Err(ClientError::ActionPending {
                    operation: "update profile".to_string(),
                });
            }
            st.profile_pending = true;
        }

        let result = self.api.update_me(&snapshot.token, update).await;
        self.state().profile_pending = false;

        match result {
            Ok(user) => self.apply_profile(user, snapshot.epoch),
            Err(err) => {
                self.handle_auth_failure(&err);
                Err(err)
            }
        }
    }

    /// Re-resolve the current user's profile from the server.
    pub async fn refresh_current_user(&self) -> ClientResult<UserProfile> {
        let snapshot = self.auth_snapshot()?;
        match self.api.fetch_me(&snapshot.token).await {
            Ok(user) => self.apply_profile(user, snapshot.epoch),
            Err(err) => {
                self.handle_auth_failure(&err);
                Err(err)
            }
        }
    }

    fn apply_profile(&self, user: UserProfile, epoch: u64) -> ClientResult<UserProfile> {
        let mut st = self.state();
        if st.epoch != epoch {
            debug!("session changed during profile request; discarding result");
            return Err(AuthError::Superseded.into());
        }
        st.current_user = Some(user.clone());
        Ok(user)
    }

    /// Add a soft skill to the current user's profile.
    ///
    /// Skills have no identity beyond the owning profile, so this is a
    /// profile update with the full recomputed set. Adding a skill that is
    /// already present is a no-op and issues no request.
    pub async fn add_skill(&self, skill: &str) -> ClientResult<UserProfile> {
        let current = self
            .current_user()
            .ok_or(ClientError::Auth(AuthError::NotAuthenticated))?;
        if current.has_skill(skill) {
            return Ok(current);
        }

        let mut soft_skills = current.soft_skills.clone();
        soft_skills.push(skill.to_string());
        self.update_current_user(&ProfileUpdate {
            soft_skills: Some(soft_skills),
            ..Default::default()
        })
        .await
    }

    /// Remove a soft skill from the current user's profile. Removing an
    /// absent skill is a no-op and issues no request.
    pub async fn remove_skill(&self, skill: &str) -> ClientResult<UserProfile> {
        let current = self
            .current_user()
            .ok_or(ClientError::Auth(AuthError::NotAuthenticated))?;
        if !current.has_skill(skill) {
            return Ok(current);
        }

        let soft_skills = current
            .soft_skills
            .iter()
            .filter(|s| s.as_str() != skill)
            .cloned()
            .collect();
        self.update_current_user(&ProfileUpdate {
            soft_skills: Some(soft_skills),
            ..Default::default()
        })
        .await
    }
}
