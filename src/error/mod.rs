//! Unified error handling for the client core.
//!
//! The taxonomy follows the failure classes of the product's API surface:
//!
//! - **Auth**: credential exchange rejections and expired/revoked tokens
//! - **Api**: server-rejected payloads, missing resources, challenge rules
//! - **Network**: transport failures and malformed response bodies
//! - **ActionPending**: a duplicate submit while the same action is in flight
//!
//! Every variant exposes a displayable `user_message()`, a short
//! `error_code()` for logging, and `requires_reauth()` so callers can force
//! a logout on expired-token responses. No failure here is fatal: callers
//! resolve each one to a stable, previously-valid state plus a surfaced
//! message.

mod api;
mod auth;
mod network;

pub use api::ApiError;
pub use auth::AuthError;
pub use network::{classify_reqwest_error, NetworkError};

use std::fmt;

/// Result type alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified error type for the client core.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Authentication/authorization errors.
    Auth(AuthError),

    /// Server-rejection errors.
    Api(ApiError),

    /// Transport errors.
    Network(NetworkError),

    /// The same action was submitted again while a previous submission is
    /// still outstanding.
    ActionPending { operation: String },
}

impl ClientError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth(err) => err.user_message(),
            ClientError::Api(err) => err.user_message(),
            ClientError::Network(err) => err.user_message(),
            ClientError::ActionPending { .. } => {
                "That action is already in progress. Please wait for it to finish.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Auth(err) => err.error_code(),
            ClientError::Api(err) => err.error_code(),
            ClientError::Network(err) => err.error_code(),
            ClientError::ActionPending { .. } => "E_ACTION_PENDING",
        }
    }

    /// Check if this error invalidates the current session.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ClientError::Auth(err) => err.requires_reauth(),
            _ => false,
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Auth(err) => write!(f, "{}", err),
            ClientError::Api(err) => write!(f, "{}", err),
            ClientError::Network(err) => write!(f, "{}", err),
            ClientError::ActionPending { operation } => {
                write!(f, "Action '{}' is already pending", operation)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Auth(err) => Some(err),
            ClientError::Api(err) => Some(err),
            ClientError::Network(err) => Some(err),
            ClientError::ActionPending { .. } => None,
        }
    }
}

impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        ClientError::Auth(err)
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Api(err)
    }
}

impl From<NetworkError> for ClientError {
    fn from(err: NetworkError) -> Self {
        ClientError::Network(err)
    }
}
