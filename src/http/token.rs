//! # Auth token persistence
//!
//! The backend issues one opaque token per login. It is kept in two places:
//!
//! - a [`SessionToken`], the in-memory slot shared by the [`ApiClient`](super::ApiClient)
//!   (which sends it as `Authorization: Token <value>`) and the
//!   [`AuthSession`](super::AuthSession) (which sets and clears it);
//! - a [`TokenStore`], so that the next process starts logged in.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;

/// File name of the persisted token inside the client's config directory.
pub const TOKEN_FILE: &str = "token";

/// Errors raised while reading or writing a persisted token.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Failed to read token file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write token file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove token file '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable storage for the auth token.
pub trait TokenStore: Send + Sync {
    /// The stored token, `None` when nobody is logged in.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Forgets the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Stores the token as a plain file, by default `<config_dir>/catalog-client/token`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store for the file [`TOKEN_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let write_error = |source| TokenStoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, token).map_err(write_error)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::Remove {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The token currently attached to outgoing requests. Clones share the slot.
///
/// The value never shows up in `Debug` output.
#[derive(Clone, Default)]
pub struct SessionToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionToken {
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token)),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, token: Option<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_set() { "••••••••" } else { "none" };
        write!(f, "SessionToken({state})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path().join("catalog-client"));

        assert_eq!(store.load().unwrap(), None);
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
        assert!(store.path().ends_with("catalog-client/token"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path());
        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_session_token_hides_value() {
        let token = SessionToken::new(Some("secret".to_string()));
        let shared = token.clone();
        assert_eq!(format!("{token:?}"), "SessionToken(••••••••)");

        shared.set(None);
        assert!(!token.is_set());
        assert_eq!(format!("{token:?}"), "SessionToken(none)");
    }
}
