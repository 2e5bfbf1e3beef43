//! File-based credential store.
//!
//! Stores the bearer credential in `~/.ubuntoo/.credentials.json`, the
//! single well-known location whose presence triggers the session's
//! startup resolve step.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::warn;

use crate::traits::{CredentialStore, CredentialStoreError};

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".ubuntoo";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// On-disk shape of the stored credential.
///
/// NOTE: only the bearer token is stored locally. Identity and profile data
/// are always re-resolved from the server at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct StoredCredential {
    access_token: Option<String>,
}

/// Credential store backed by a JSON file in the user's home directory.
#[derive(Debug)]
pub struct FileCredentialStore {
    /// Path to the credentials file.
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store at the default location.
    ///
    /// Fails when the home directory cannot be determined.
    pub fn new() -> Result<Self, CredentialStoreError> {
        let home = dirs::home_dir().ok_or(CredentialStoreError::NoStorageLocation)?;
        Ok(Self {
            path: home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        })
    }

    /// Create a store at a custom path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path to the credentials file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    /// Load the stored credential.
    ///
    /// A missing or unreadable file is treated as "nothing stored": a
    /// corrupt store must not wedge startup, only force a fresh sign-in.
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not open credential file");
                return Ok(None);
            }
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, StoredCredential>(reader) {
            Ok(stored) => Ok(stored.access_token.filter(|t| !t.is_empty())),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential file is not valid JSON");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| CredentialStoreError::Io(e.to_string()))?;
            }
        }

        let file =
            File::create(&self.path).map_err(|e| CredentialStoreError::Io(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        let stored = StoredCredential {
            access_token: Some(token.to_string()),
        };
        serde_json::to_writer_pretty(&mut writer, &stored)
            .map_err(|e| CredentialStoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CredentialStoreError::Io(e.to_string()))
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| CredentialStoreError::Io(e.to_string()))
    }
}
