//! API-level error types.
//!
//! This module defines errors for requests the server (or a client-side
//! pre-check standing in for it) rejected: validation failures, missing
//! resources, and challenge capacity/date rules.

use std::fmt;

/// Server-rejection error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server rejected the payload. The detail message is surfaced
    /// verbatim.
    Validation { detail: String },

    /// The requested resource does not exist.
    NotFound { message: String },

    /// The challenge has reached its participant limit. Produced by the
    /// client-side capacity check; the server's own rejection arrives as
    /// `Validation`.
    ChallengeFull,

    /// The challenge's end date has passed.
    ChallengeClosed,

    /// Any other non-success HTTP status.
    Http { status: u16, message: String },
}

impl ApiError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { detail } => detail.clone(),
            ApiError::NotFound { .. } => "The requested item could not be found.".to_string(),
            ApiError::ChallengeFull => {
                "This challenge is full and no longer accepts participants.".to_string()
            }
            ApiError::ChallengeClosed => "This challenge has ended.".to_string(),
            ApiError::Http { status, .. } => match *status {
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}). Please try again.", status),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "E_API_VALIDATION",
            ApiError::NotFound { .. } => "E_API_NOT_FOUND",
            ApiError::ChallengeFull => "E_API_CHALLENGE_FULL",
            ApiError::ChallengeClosed => "E_API_CHALLENGE_CLOSED",
            ApiError::Http { .. } => "E_API_HTTP",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation { detail } => write!(f, "Validation failed: {}", detail),
            ApiError::NotFound { message } => write!(f, "Not found: {}", message),
            ApiError::ChallengeFull => write!(f, "Challenge is full"),
            ApiError::ChallengeClosed => write!(f, "Challenge has ended"),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}
