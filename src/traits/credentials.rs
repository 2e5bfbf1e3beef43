//! Credential store trait abstraction.
//!
//! The bearer credential is the only value persisted across process
//! restarts. This trait is the seam between the session and that storage,
//! enabling dependency injection and an in-memory store in tests.

use std::fmt;

/// Credential storage errors.
#[derive(Debug, Clone)]
pub enum CredentialStoreError {
    /// The storage location could not be determined.
    NoStorageLocation,
    /// IO error while reading or writing the store.
    Io(String),
    /// Serialization/deserialization error.
    Serialization(String),
}

impl fmt::Display for CredentialStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialStoreError::NoStorageLocation => {
                write!(f, "Could not determine credential storage location")
            }
            CredentialStoreError::Io(msg) => write!(f, "IO error: {}", msg),
            CredentialStoreError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CredentialStoreError {}

/// Trait for credential storage and retrieval.
///
/// Implementations include the production file-based store and an
/// in-memory store for tests. Operations are synchronous: the store holds a
/// single small value and `logout()` must complete without suspending.
pub trait CredentialStore: Send + Sync {
    /// Load the persisted credential.
    ///
    /// Returns `Ok(None)` when nothing is stored. A missing or unreadable
    /// store is indistinguishable from an empty one from the caller's
    /// perspective; implementations may report the underlying problem.
    fn load(&self) -> Result<Option<String>, CredentialStoreError>;

    /// Persist the credential, replacing any previous value.
    fn save(&self, token: &str) -> Result<(), CredentialStoreError>;

    /// Remove the persisted credential, if any.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// A shared store is itself a store. Lets an embedder (or a test) keep a
/// handle onto the store it hands to the session.
impl<S: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        (**self).load()
    }

    fn save(&self, token: &str) -> Result<(), CredentialStoreError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        (**self).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_store_error_display() {
        assert_eq!(
            CredentialStoreError::NoStorageLocation.to_string(),
            "Could not determine credential storage location"
        );
        assert_eq!(
            CredentialStoreError::Io("disk full".to_string()).to_string(),
            "IO error: disk full"
        );
        assert_eq!(
            CredentialStoreError::Serialization("invalid json".to_string()).to_string(),
            "Serialization error: invalid json"
        );
    }

    #[test]
    fn test_credential_store_error_implements_error_trait() {
        let err = CredentialStoreError::NoStorageLocation;
        let _: &dyn std::error::Error = &err;
    }
}
