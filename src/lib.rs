//! Client core for the UBUNTOO community network.
//!
//! Owns the two concerns every screen shares: the session/credential
//! lifecycle ([`session::Session`]) and the fetch-list/mutate/resynchronize
//! pattern ([`sync::ResourceSync`]) applied to posts, challenges and
//! badges. The view layer is an external collaborator: it reads the public
//! state exposed here and dispatches the public operations, and performs no
//! network access of its own.

pub mod adapters;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sync;
pub mod traits;
