use std::collections::HashMap;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "session_id";
const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    #[serde(skip)]
    pub token: String,
    pub user_id: String,
    pub user_name: String,
    pub login_time: DateTime<Utc>,
    pub language: String,
}

/// In-memory login sessions keyed by an opaque token. Lost on restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_id: &str, user_name: &str) -> SessionUser {
        let session = SessionUser {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            login_time: Utc::now(),
            language: DEFAULT_LANGUAGE.to_string(),
        };
        self.sessions
            .write()
            .insert(session.token.clone(), session.clone());
        session
    }

    pub fn get(&self, token: &str) -> Option<SessionUser> {
        self.sessions.read().get(token).cloned()
    }

    pub fn remove(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }

    pub fn set_language(&self, token: &str, language: &str) -> bool {
        match self.sessions.write().get_mut(token) {
            Some(session) => {
                session.language = language.to_string();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session cookie first, then `Authorization: Bearer`.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = get_cookie(headers, SESSION_COOKIE_NAME) {
        return Some(token);
    }

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie_header(token: &str, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

pub fn clear_session_cookie_header(secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}
