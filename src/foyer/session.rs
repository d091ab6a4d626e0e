//! Cookie-keyed session store. The store itself is opaque key-value state;
//! the rest of the core only ever reads and writes the `user_id` key.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use ulid::Ulid;

use crate::foyer::error::Error;

pub const SESSION_COOKIE_NAME: &str = "foyer_session";
pub const USER_ID_KEY: &str = "user_id";

#[derive(Clone, Debug, Default)]
pub struct SessionData {
    values: HashMap<String, String>,
}

impl SessionData {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// In-memory session store shared across request handlers. Reads and writes
/// are atomic at the store level; expiry is handled outside this core.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns an error if the store is unusable (poisoned lock).
    pub fn get(&self, token: &str) -> Result<Option<SessionData>, Error> {
        let sessions = self
            .sessions
            .read()
            .map_err(|err| Error::Session(err.to_string()))?;

        Ok(sessions.get(token).cloned())
    }

    /// # Errors
    /// Returns an error if the store is unusable (poisoned lock).
    pub fn save(&self, token: &str, data: SessionData) -> Result<(), Error> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| Error::Session(err.to_string()))?;

        sessions.insert(token.to_string(), data);

        Ok(())
    }
}

/// Pull the session token out of the Cookie header, if any.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
    })
}

/// Build the `Set-Cookie` value for a session token.
///
/// # Errors
/// Returns an error if the token cannot be encoded as a header value.
pub fn session_cookie(token: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .map_err(|err| Error::Session(err.to_string()))
}

/// Create a session holding the user id and return its `Set-Cookie` value.
///
/// # Errors
/// Returns an error if the session cannot be saved.
pub fn start_session(store: &SessionStore, user_id: i64) -> Result<HeaderValue, Error> {
    let token = Ulid::new().to_string();

    let mut data = SessionData::default();
    data.set(USER_ID_KEY, &user_id.to_string());
    store.save(&token, data)?;

    session_cookie(&token)
}

/// Resolve the request's session cookie into the authenticated user id.
///
/// Returns `Ok(None)` when there is no cookie or no matching session.
///
/// # Errors
/// Returns an error if the session store fails.
pub fn current_user(store: &SessionStore, headers: &HeaderMap) -> Result<Option<String>, Error> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };

    Ok(store
        .get(&token)?
        .and_then(|data| data.get(USER_ID_KEY).map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn extract_token_from_cookie_header() {
        let headers = headers_with_cookie("theme=dark; foyer_session=01ARZ3; other=1");
        assert_eq!(extract_session_token(&headers), Some("01ARZ3".to_string()));

        assert_eq!(extract_session_token(&HeaderMap::new()), None);
        assert_eq!(
            extract_session_token(&headers_with_cookie("theme=dark")),
            None
        );
        assert_eq!(
            extract_session_token(&headers_with_cookie("foyer_session=")),
            None
        );
    }

    #[test]
    fn start_session_then_resolve_user() {
        let store = SessionStore::new();
        let cookie = start_session(&store, 42).unwrap();

        let headers = headers_with_cookie(cookie.to_str().unwrap());
        assert_eq!(
            current_user(&store, &headers).unwrap(),
            Some("42".to_string())
        );
    }

    #[test]
    fn unknown_token_resolves_to_no_user() {
        let store = SessionStore::new();
        let headers = headers_with_cookie("foyer_session=unknown");
        assert_eq!(current_user(&store, &headers).unwrap(), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("token").unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("foyer_session=token"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Path=/"));
    }
}
