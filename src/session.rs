use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "rangeshop_sid";

/// What a session holds: the logged-in username and its role string. The
/// role is trusted at face value wherever it is read back; nothing
/// re-checks it against the backend.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub role: String,
}

/// In-memory session store keyed by the opaque cookie token. Concurrent
/// requests under the same token share no ordering guarantee beyond the
/// map lock itself.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session and returns its fresh token.
    pub async fn create(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        self.inner.write().await.insert(token.clone(), session);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        self.inner.read().await.get(token).cloned()
    }

    pub async fn destroy(&self, token: &str) {
        self.inner.write().await.remove(token);
    }
}

/// Cookie for a fresh session. No HttpOnly and no Secure: the token must
/// stay reachable from injected script for the XSS exercises to land.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/")
}

/// Cookie that expires the session token in the browser.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0")
}

/// The request's session, resolved from the cookie header against the
/// store. Extraction never fails: anonymous requests simply carry neither
/// token nor data.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub data: Option<Session>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_ref(state);
        let token = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(token_from_cookie_header);
        let data = match &token {
            Some(t) => store.get(t).await,
            None => None,
        };
        Ok(CurrentSession { token, data })
    }
}

fn token_from_cookie_header(raw: &str) -> Option<String> {
    raw.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
