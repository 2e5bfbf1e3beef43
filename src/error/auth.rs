//! Authentication-related error types.
//!
//! This module defines errors related to user authentication, credential
//! exchange, and authorization of API requests.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The credential exchange was rejected (wrong email/password, or a
    /// registration conflict such as an already-taken email or username).
    InvalidCredentials { detail: Option<String> },

    /// An authorized request was rejected by the server (expired or revoked
    /// token). Forces a logout.
    Unauthorized { message: String },

    /// An authorized operation was attempted without an authenticated
    /// session.
    NotAuthenticated,

    /// The session changed (logout or re-login) while the request was in
    /// flight; its result was disregarded.
    Superseded,
}

impl AuthError {
    /// Check if this error invalidates the current session.
    ///
    /// A failed login attempt does not (the session was never established);
    /// a rejected token on an authorized call does.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AuthError::Unauthorized { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials { detail } => match detail {
                Some(d) => d.clone(),
                None => "Invalid email or password.".to_string(),
            },
            AuthError::Unauthorized { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::Superseded => {
                "Your session changed while the request was in progress. Please try again."
                    .to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::Unauthorized { .. } => "E_AUTH_TOKEN",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::Superseded => "E_AUTH_SUPERSEDED",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials { detail } => match detail {
                Some(d) => write!(f, "Credential exchange rejected: {}", d),
                None => write!(f, "Credential exchange rejected"),
            },
            AuthError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message)
            }
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::Superseded => write!(f, "Session changed while request was in flight"),
        }
    }
}

impl std::error::Error for AuthError {}
