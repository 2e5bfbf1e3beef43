//! Typed records for the product's API surface.
//!
//! Every request and response shape the client depends on is declared here
//! as an explicit serde record; a response that does not match its record
//! fails the call instead of propagating duck-typed values.

mod badge;
mod challenge;
mod post;
mod user;

pub use badge::{Badge, BadgeNomination, BadgeStatus, BadgeType};
pub use challenge::{Challenge, ChallengeDraft, DEFAULT_CATEGORY};
pub use post::{Post, PostAuthor, PostDraft, PostType};
pub use user::{AuthExchange, ProfileUpdate, Registration, UserProfile};
