//! Typed HTTP client for the backend API.
//!
//! One method per endpoint, each returning the explicit record the caller
//! depends on. The client holds no credential: authorized methods take the
//! bearer token as an argument, so callers derive it from the session at
//! call time and a logout can never leak a stale header into a later
//! request.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{
    classify_reqwest_error, ApiError, AuthError, ClientError, ClientResult, NetworkError,
};
use crate::models::{
    AuthExchange, Badge, BadgeNomination, Challenge, ChallengeDraft, Post, PostDraft,
    ProfileUpdate, Registration, UserProfile,
};

/// Client for the backend's JSON API.
pub struct ApiClient {
    /// Base URL of the backend, without the `/api` prefix.
    base_url: String,
    /// Reusable HTTP client.
    client: Client,
}

impl ApiClient {
    /// Create a new ApiClient from a configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NetworkError::Other {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create a new ApiClient against a custom base URL with default
    /// settings. Handy for tests against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(&ClientConfig::default().with_base_url(base_url))
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Map a non-success response into the error taxonomy, extracting the
    /// server's `detail` message when one is present.
    async fn reject(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from));
        debug!(status, ?detail, "request rejected");
        match status {
            401 => AuthError::Unauthorized {
                message: detail.unwrap_or_else(|| "Unauthorized".to_string()),
            }
            .into(),
            404 => ApiError::NotFound {
                message: detail.unwrap_or_else(|| "Not found".to_string()),
            }
            .into(),
            400 | 422 => ApiError::Validation {
                detail: detail.unwrap_or_else(|| "The request was rejected.".to_string()),
            }
            .into(),
            _ => ApiError::Http {
                status,
                message: detail.unwrap_or_else(|| {
                    let mut message = body;
                    message.truncate(200);
                    message
                }),
            }
            .into(),
        }
    }

    /// Decode a successful response body into its declared record.
    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> ClientResult<T> {
        let text = response.text().await.map_err(|e| NetworkError::Other {
            message: format!("Failed to read {} response: {}", operation, e),
        })?;
        serde_json::from_str(&text).map_err(|e| {
            NetworkError::InvalidResponse {
                message: format!("{} response did not match its expected shape: {}", operation, e),
            }
            .into()
        })
    }

    /// Exchange email and password for a credential.
    ///
    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthExchange> {
        let url = self.url("/auth/login");
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "login"))?;

        if !response.status().is_success() {
            return Err(Self::as_credential_rejection(self.reject(response).await));
        }
        self.decode(response, "login").await
    }

    /// Register a new account; success implies immediate authentication.
    ///
    /// POST /auth/register
    pub async fn register(&self, registration: &Registration) -> ClientResult<AuthExchange> {
        let url = self.url("/auth/register");

        let response = self
            .client
            .post(&url)
            .json(registration)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "register"))?;

        if !response.status().is_success() {
            return Err(Self::as_credential_rejection(self.reject(response).await));
        }
        self.decode(response, "register").await
    }

    /// A rejected credential exchange is a login failure, not a sign that an
    /// established session expired.
    fn as_credential_rejection(err: ClientError) -> ClientError {
        match err {
            ClientError::Auth(AuthError::Unauthorized { message }) => {
                AuthError::InvalidCredentials {
                    detail: Some(message),
                }
                .into()
            }
            ClientError::Api(ApiError::Validation { detail }) => AuthError::InvalidCredentials {
                detail: Some(detail),
            }
            .into(),
            other => other,
        }
    }

    /// Resolve the identity behind a credential.
    ///
    /// GET /users/me
    pub async fn fetch_me(&self, token: &str) -> ClientResult<UserProfile> {
        let url = self.url("/users/me");
        let response = self
            .client
            .get(&url)
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "resolve identity"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "resolve identity").await
    }

    /// Apply a partial profile update; the returned profile is
    /// authoritative.
    ///
    /// PUT /users/me
    pub async fn update_me(&self, token: &str, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        let url = self.url("/users/me");
        let response = self
            .client
            .put(&url)
            .header("Authorization", Self::bearer(token))
            .json(update)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "update profile"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "update profile").await
    }

    /// Fetch the feed, newest first, in server order.
    ///
    /// GET /posts
    pub async fn list_posts(&self, token: &str) -> ClientResult<Vec<Post>> {
        let url = self.url("/posts");
        let response = self
            .client
            .get(&url)
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "list posts"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "list posts").await
    }

    /// Publish a post.
    ///
    /// POST /posts
    pub async fn create_post(&self, token: &str, draft: &PostDraft) -> ClientResult<Post> {
        let url = self.url("/posts");
        let response = self
            .client
            .post(&url)
            .header("Authorization", Self::bearer(token))
            .json(draft)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "create post"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "create post").await
    }

    /// Fetch active challenges.
    ///
    /// GET /challenges
    pub async fn list_challenges(&self, token: &str) -> ClientResult<Vec<Challenge>> {
        let url = self.url("/challenges");
        let response = self
            .client
            .get(&url)
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "list challenges"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "list challenges").await
    }

    /// Propose a new challenge.
    ///
    /// POST /challenges
    pub async fn create_challenge(
        &self,
        token: &str,
        draft: &ChallengeDraft,
    ) -> ClientResult<Challenge> {
        let url = self.url("/challenges");
        let response = self
            .client
            .post(&url)
            .header("Authorization", Self::bearer(token))
            .json(draft)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "create challenge"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "create challenge").await
    }

    /// Join a challenge. The response body is unused.
    ///
    /// POST /challenges/{id}/join
    pub async fn join_challenge(&self, token: &str, challenge_id: &str) -> ClientResult<()> {
        let url = self.url(&format!("/challenges/{}/join", challenge_id));
        let response = self
            .client
            .post(&url)
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "join challenge"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(())
    }

    /// Fetch the badges owned by a user.
    ///
    /// GET /badges?user_id={id}
    pub async fn list_badges(&self, token: &str, user_id: &str) -> ClientResult<Vec<Badge>> {
        let url = self.url("/badges");
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "list badges"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "list badges").await
    }

    /// Nominate a user for a badge.
    ///
    /// POST /badges
    pub async fn nominate_badge(
        &self,
        token: &str,
        nomination: &BadgeNomination,
    ) -> ClientResult<Badge> {
        let url = self.url("/badges");
        let response = self
            .client
            .post(&url)
            .header("Authorization", Self::bearer(token))
            .json(nomination)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "nominate badge"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        self.decode(response, "nominate badge").await
    }

    /// Cast a community vote on a pending badge. The response body is
    /// unused.
    ///
    /// POST /badges/{id}/vote?vote={bool}
    pub async fn vote_badge(&self, token: &str, badge_id: &str, approve: bool) -> ClientResult<()> {
        let url = self.url(&format!("/badges/{}/vote", badge_id));
        let response = self
            .client
            .post(&url)
            .query(&[("vote", approve)])
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "vote badge"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(())
    }

    /// Probe backend availability.
    ///
    /// GET /health
    pub async fn health(&self) -> ClientResult<()> {
        let url = self.url("/health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url, "health check"))?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }
        Ok(())
    }
}
