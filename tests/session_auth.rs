//! Integration tests for the session store and auth header lifecycle.

use std::sync::Arc;

use turmalin::api::ApiClient;
use turmalin::session::{Session, SessionStore};

fn client_over(dir: &tempfile::TempDir) -> (ApiClient, Arc<SessionStore>) {
    let store = Arc::new(SessionStore::load(dir.path().join("session.json")));
    let client = ApiClient::new("http://localhost:8000".into(), store.clone());
    (client, store)
}

#[test]
/// What: No Authorization header is derived while logged out
///
/// - Input: Fresh store, no session
/// - Output: auth_header is None
fn no_header_when_logged_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (client, store) = client_over(&dir);
    assert!(!store.is_authenticated());
    assert!(client.auth_header().is_none());
}

#[test]
/// What: The header carries the token in the backend's `Token` scheme
///
/// - Input: Stored session with token "abc123"
/// - Output: `Token abc123`
fn header_uses_token_scheme() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (client, store) = client_over(&dir);
    store.set(Session {
        token: "abc123".into(),
        username: "admin".into(),
    });
    assert_eq!(client.auth_header().as_deref(), Some("Token abc123"));
}

#[test]
/// What: After logout no further Authorization header is attached
///
/// - Input: Authenticated client, then logout()
/// - Output: is_authenticated false and auth_header None, durably
fn logout_stops_header_attachment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (client, store) = client_over(&dir);
    store.set(Session {
        token: "abc123".into(),
        username: "admin".into(),
    });
    assert!(client.is_authenticated());

    client.logout();
    assert!(!client.is_authenticated());
    assert!(client.auth_header().is_none());

    // A reload sees the cleared state too: the file is gone.
    let reloaded = SessionStore::load(dir.path().join("session.json"));
    assert!(!reloaded.is_authenticated());
}

#[test]
/// What: A persisted session resumes as authenticated across processes
///
/// - Input: One store writes a session; a second loads the same path
/// - Output: Second client derives the same header
fn persisted_session_resumes() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let (_, store) = client_over(&dir);
        store.set(Session {
            token: "tok-9".into(),
            username: "usuario".into(),
        });
    }
    let (client, store) = client_over(&dir);
    assert_eq!(store.username().as_deref(), Some("usuario"));
    assert_eq!(client.auth_header().as_deref(), Some("Token tok-9"));
}
