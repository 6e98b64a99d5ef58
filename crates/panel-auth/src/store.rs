//! Persistent session-token storage.
//!
//! The token has a manual lifecycle: set on login, read on every
//! request, cleared on logout. It is held in an explicit store passed
//! to whoever needs it rather than looked up ambiently.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use panel_core::PanelResult;

/// On-disk credential file shape.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    /// The raw bearer token.
    token: String,
}

/// Holds the session token for the lifetime of the process, optionally
/// backed by a JSON credentials file.
#[derive(Debug)]
pub struct TokenStore {
    /// Current token, if logged in.
    inner: RwLock<Option<String>>,
    /// Backing file; `None` for a purely in-memory store.
    path: Option<PathBuf>,
}

impl TokenStore {
    /// Create a store with no persistence (used by tests).
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(None),
            path: None,
        }
    }

    /// Open a file-backed store, reading any previously saved token.
    ///
    /// A missing file is not an error; it just means nobody is logged
    /// in yet.
    pub fn open(path: impl AsRef<Path>) -> PanelResult<Self> {
        let path = path.as_ref().to_path_buf();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => {
                let creds: StoredCredentials = serde_json::from_str(&raw)?;
                Some(creds.token)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            inner: RwLock::new(token),
            path: Some(path),
        })
    }

    /// Current token, if any.
    pub fn get_token(&self) -> Option<String> {
        self.inner.read().expect("token lock poisoned").clone()
    }

    /// Whether a token is present.
    pub fn is_logged_in(&self) -> bool {
        self.get_token().is_some()
    }

    /// Store a new token and persist it if file-backed.
    pub fn set_token(&self, token: impl Into<String>) -> PanelResult<()> {
        let token = token.into();
        *self.inner.write().expect("token lock poisoned") = Some(token.clone());

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let body = serde_json::to_string_pretty(&StoredCredentials { token })?;
            fs::write(path, body)?;
            debug!(path = %path.display(), "session token saved");
        }
        Ok(())
    }

    /// Drop the token and remove the credentials file if present.
    pub fn clear_token(&self) -> PanelResult<()> {
        *self.inner.write().expect("token lock poisoned") = None;

        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "session token cleared"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lifecycle() {
        let store = TokenStore::in_memory();
        assert!(!store.is_logged_in());

        store.set_token("abc").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("abc"));

        store.clear_token().unwrap();
        assert!(store.get_token().is_none());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = TokenStore::open(&path).unwrap();
        assert!(!store.is_logged_in());
        store.set_token("abc").unwrap();

        let reopened = TokenStore::open(&path).unwrap();
        assert_eq!(reopened.get_token().as_deref(), Some("abc"));

        reopened.clear_token().unwrap();
        assert!(!path.exists());

        // Clearing twice is fine.
        reopened.clear_token().unwrap();
    }
}
