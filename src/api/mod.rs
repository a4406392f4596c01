//! HTTP gateway to the school-management REST backend.
//!
//! Every request the application makes flows through [`ApiClient`]: it owns
//! the single `reqwest` client, injects the session token as
//! `Authorization: Token <t>`, normalizes dual-shape list payloads into
//! [`Page`], and translates failures into the [`ApiError`] taxonomy. A 401
//! from any endpoint clears the session store before the error is returned,
//! so callers always observe the logout; routing back to the login screen is
//! the event loop's job when it sees [`ApiError::Auth`].

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::session::{Session, SessionStore};
use crate::state::Page;

pub mod alunos;
pub mod turmas;

/// Failure taxonomy for backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, expired, or rejected credentials. The session store has
    /// already been cleared when this is returned from an authenticated call.
    #[error("authentication required")]
    Auth,

    /// The backend rejected the payload; `errors` carries the field-level
    /// messages exactly as received.
    #[error("the server rejected the submitted data")]
    Validation {
        /// Raw validation body, keyed by wire field name.
        errors: Value,
    },

    /// Transport-level failure (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other non-success response.
    #[error("server returned status {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, when it was readable JSON.
        payload: Value,
    },
}

/// Result alias for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// List payload as it appears on the wire: a pagination envelope or the
/// legacy bare array. Normalized into [`Page`] immediately after the call.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    /// Paginated envelope.
    Paginated(Page<T>),
    /// Legacy bare array.
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    /// Collapse both wire shapes into one [`Page`].
    ///
    /// A bare array becomes a single full page; an envelope that omits its
    /// count is repaired from the result length.
    pub fn normalize(self) -> Page<T> {
        match self {
            Self::Paginated(mut page) => {
                if page.count == 0 && !page.results.is_empty() {
                    page.count = page.results.len() as u64;
                }
                page
            }
            Self::Bare(items) => Page {
                count: items.len() as u64,
                results: items,
                next: None,
                previous: None,
            },
        }
    }
}

/// What: Flatten a validation payload into per-field display messages.
///
/// Inputs:
/// - `errors`: Raw body of a 400 response (`{"field": ["msg", ...]}` or
///   `{"error": "msg"}` shapes)
///
/// Output:
/// - Map of wire field name to a joined, human-readable message.
pub fn validation_messages(errors: &Value) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Value::Object(map) = errors {
        for (field, val) in map {
            let msg = match val {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                other => other.to_string(),
            };
            if !msg.is_empty() {
                out.insert(field.clone(), msg);
            }
        }
    }
    out
}

/// Single HTTP client bound to the configured backend.
///
/// Cheap to clone; clones share the connection pool and the session store.
#[derive(Clone, Debug)]
pub struct ApiClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Backend origin without a trailing slash.
    base_url: String,
    /// Injected session store read for every request.
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client for `base_url`, reading credentials from `session`.
    pub fn new(base_url: String, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// `Authorization` header value for the current session, when logged in.
    pub fn auth_header(&self) -> Option<String> {
        self.session.token().map(|t| format!("Token {t}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// What: Send a prepared request and translate the response status.
    ///
    /// Inputs:
    /// - `rb`: Request with method, URL, query, and body already applied
    ///
    /// Output:
    /// - The successful response, or the mapped [`ApiError`].
    ///
    /// Details:
    /// - 401 clears the session store and maps to [`ApiError::Auth`].
    /// - 400 maps to [`ApiError::Validation`] with the body preserved.
    /// - Other non-success statuses map to [`ApiError::Api`].
    async fn send(&self, rb: RequestBuilder) -> Result<Response> {
        let rb = match self.auth_header() {
            Some(value) => rb.header(reqwest::header::AUTHORIZATION, value),
            None => rb,
        };
        let resp = rb.send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("request rejected as unauthenticated; clearing session");
            self.session.clear();
            return Err(ApiError::Auth);
        }
        if status == StatusCode::BAD_REQUEST {
            let errors = resp.json::<Value>().await.unwrap_or(Value::Null);
            debug!(%errors, "request rejected with validation errors");
            return Err(ApiError::Validation { errors });
        }
        if !status.is_success() {
            let payload = resp.json::<Value>().await.unwrap_or(Value::Null);
            warn!(status = status.as_u16(), "request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                payload,
            });
        }
        Ok(resp)
    }

    /// GET `path` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.http.get(self.url(path))).await?;
        Ok(resp.json::<T>().await?)
    }

    /// GET a list endpoint with query parameters, normalized to a [`Page`].
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>> {
        let mut rb = self.http.get(self.url(path));
        if !query.is_empty() {
            rb = rb.query(query);
        }
        let resp = self.send(rb).await?;
        let payload = resp.json::<ListPayload<T>>().await?;
        Ok(payload.normalize())
    }

    /// POST `body` to `path` and decode the JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(resp.json::<T>().await?)
    }

    /// PUT `body` to `path` and decode the JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.send(self.http.put(self.url(path)).json(body)).await?;
        Ok(resp.json::<T>().await?)
    }

    /// DELETE `path`, expecting an empty 204 response.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let rb = self.http.request(Method::DELETE, self.url(path));
        self.send(rb).await?;
        Ok(())
    }

    /// What: Authenticate and persist the resulting session.
    ///
    /// Inputs:
    /// - `username`, `password`: Credentials as typed by the user
    ///
    /// Output:
    /// - The stored [`Session`] on success; [`ApiError::Auth`] on rejected
    ///   credentials (the backend answers those with 400).
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let body = serde_json::json!({ "username": username, "password": password });
        let rb = self.http.post(self.url("/api/login/")).json(&body);
        let resp = match self.send(rb).await {
            Ok(r) => r,
            Err(ApiError::Validation { .. } | ApiError::Auth) => return Err(ApiError::Auth),
            Err(e) => return Err(e),
        };

        /// Body of a successful login response.
        #[derive(serde::Deserialize)]
        struct TokenResponse {
            /// Issued API token.
            token: String,
        }
        let tr: TokenResponse = resp.json().await?;
        let session = Session {
            token: tr.token,
            username: username.to_string(),
        };
        self.session.set(session.clone());
        info!(user = %username, "login succeeded");
        Ok(session)
    }

    /// Forget the current session. No network call is made.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// `true` iff the session store currently holds a token.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Aluno;

    #[test]
    /// What: A paginated envelope normalizes as-is
    ///
    /// - Input: Envelope JSON with count 41 and a next link
    /// - Output: Page fields preserved
    fn envelope_normalizes_unchanged() {
        let payload: ListPayload<Aluno> = serde_json::from_str(
            r#"{"count":41,"next":"http://x/api/alunos/?page=2","previous":null,
                "results":[{"id":1,"nome":"Ana","email":"a@b.c","matricula":"m1",
                            "data_nascimento":"2010-01-01","turma":1,"turma_nome":"T"}]}"#,
        )
        .unwrap();
        let page = payload.normalize();
        assert_eq!(page.count, 41);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    /// What: A bare array normalizes to a single full page
    ///
    /// - Input: Bare JSON array with two students
    /// - Output: count 2, no next/previous
    fn bare_array_normalizes_to_single_page() {
        let payload: ListPayload<Aluno> = serde_json::from_str(
            r#"[{"id":1,"nome":"Ana","email":"a@b.c","matricula":"m1",
                 "data_nascimento":"2010-01-01","turma":1,"turma_nome":"T"},
                {"id":2,"nome":"Bia","email":"b@b.c","matricula":"m2",
                 "data_nascimento":"2011-02-02","turma":1,"turma_nome":"T"}]"#,
        )
        .unwrap();
        let page = payload.normalize();
        assert_eq!(page.count, 2);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    /// What: An envelope without a count is repaired from the result length
    ///
    /// - Input: Envelope missing `count`
    /// - Output: count equals results length
    fn missing_count_is_repaired() {
        let payload: ListPayload<Aluno> = serde_json::from_str(
            r#"{"results":[{"id":1,"nome":"Ana","email":"a@b.c","matricula":"m1",
                            "data_nascimento":"2010-01-01","turma":1,"turma_nome":"T"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.normalize().count, 1);
    }

    #[test]
    /// What: Validation payloads flatten to joined per-field messages
    ///
    /// - Input: DRF-style body with list and string values
    /// - Output: Field map with joined strings
    fn validation_messages_flatten() {
        let body = serde_json::json!({
            "matricula": ["Esta matrícula já está em uso."],
            "error": "Turma não encontrada"
        });
        let msgs = validation_messages(&body);
        assert_eq!(
            msgs.get("matricula").map(String::as_str),
            Some("Esta matrícula já está em uso.")
        );
        assert_eq!(
            msgs.get("error").map(String::as_str),
            Some("Turma não encontrada")
        );
    }
}
