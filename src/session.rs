//! Persistent session store: the authenticated user's token and name.
//!
//! Token and username always move together: both present after a successful
//! login, both gone after logout or a rejected request. The pair is persisted
//! as JSON under the config directory so a restart resumes the session.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Authenticated session as persisted on disk.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Backend-issued API token.
    pub token: String,
    /// Username the token was issued for.
    pub username: String,
}

/// Shared store holding the current [`Session`], if any.
///
/// The store is injected into the API client and the runtime; it is the single
/// authority on whether the process is authenticated.
#[derive(Debug)]
pub struct SessionStore {
    /// Where the session JSON is persisted.
    path: PathBuf,
    /// Current session; `None` while logged out.
    inner: Mutex<Option<Session>>,
}

impl SessionStore {
    /// What: Initialize the store from the persisted session file.
    ///
    /// Inputs:
    /// - `path`: Location of the session JSON
    ///
    /// Output:
    /// - A store primed with the persisted session when the file exists and
    ///   parses; an empty store otherwise.
    pub fn load(path: PathBuf) -> Self {
        let session = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(s) => {
                    tracing::info!(user = %s.username, "restored persisted session");
                    Some(s)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid session file; ignoring");
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            path,
            inner: Mutex::new(session),
        }
    }

    /// Store a fresh session in memory and on disk.
    pub fn set(&self, session: Session) {
        if let Ok(s) = serde_json::to_string(&session) {
            match fs::write(&self.path, &s) {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), "session persisted");
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session");
                }
            }
        }
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(session);
        }
    }

    /// What: Drop the session from memory and disk unconditionally.
    ///
    /// Output:
    /// - The store reports unauthenticated afterwards; the persisted file is
    ///   removed when present.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            if guard.is_some() {
                tracing::info!("session cleared");
            }
            *guard = None;
        }
        if self.path.exists()
            && let Err(e) = fs::remove_file(&self.path)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove session file");
        }
    }

    /// Current token, when authenticated.
    pub fn token(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|g| g.as_ref().map(|s| s.token.clone()))
    }

    /// Current username, when authenticated.
    pub fn username(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|g| g.as_ref().map(|s| s.username.clone()))
    }

    /// `true` iff a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .is_some_and(|g| g.as_ref().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::load(dir.path().join("session.json"))
    }

    #[test]
    /// What: A fresh store is unauthenticated with no token or user
    ///
    /// - Input: Store over a missing file
    /// - Output: `is_authenticated` false; token and username absent
    fn fresh_store_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.username().is_none());
    }

    #[test]
    /// What: Token and username are set and cleared together
    ///
    /// - Input: set() then clear()
    /// - Output: Both present after set, both absent after clear
    fn token_and_user_move_together() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(Session {
            token: "abc123".into(),
            username: "admin".into(),
        });
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.username().as_deref(), Some("admin"));

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.username().is_none());
    }

    #[test]
    /// What: A persisted session survives a reload from the same path
    ///
    /// - Input: set() on one store, load() on a second over the same file
    /// - Output: Second store reports the same session
    fn session_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let first = SessionStore::load(path.clone());
        first.set(Session {
            token: "tok".into(),
            username: "usuario".into(),
        });

        let second = SessionStore::load(path);
        assert!(second.is_authenticated());
        assert_eq!(second.username().as_deref(), Some("usuario"));
    }

    #[test]
    /// What: A corrupt session file is ignored instead of failing the load
    ///
    /// - Input: Garbage bytes at the session path
    /// - Output: Store loads as unauthenticated
    fn corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").unwrap();
        let store = SessionStore::load(path);
        assert!(!store.is_authenticated());
    }
}
