//! In-memory credential store for tests.

use std::sync::Mutex;

use crate::traits::{CredentialStore, CredentialStoreError};

/// Credential store that keeps the token in memory.
///
/// Used by tests and by embedders that must never touch the filesystem.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a token, as if a previous session had
    /// persisted it.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Inspect the currently stored token.
    pub fn stored(&self) -> Option<String> {
        self.token.lock().expect("credential store lock poisoned").clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.stored())
    }

    fn save(&self, token: &str) -> Result<(), CredentialStoreError> {
        *self.token.lock().expect("credential store lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        *self.token.lock().expect("credential store lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_seeded_store() {
        let store = MemoryCredentialStore::with_token("t1");
        assert_eq!(store.load().unwrap(), Some("t1".to_string()));
    }

    #[test]
    fn test_save_and_clear() {
        let store = MemoryCredentialStore::new();
        store.save("t2").unwrap();
        assert_eq!(store.stored(), Some("t2".to_string()));

        store.clear().unwrap();
        assert_eq!(store.stored(), None);
    }
}
