use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AdminConfig;

const TOKEN_BYTES: usize = 32;

/// Opaque bearer token handed out at login.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::thread_rng().gen();
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// An authenticated admin. Handlers receive this instead of consulting ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub token: SessionToken,
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("admin login is not configured")]
    LoginDisabled,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("session expired or unknown")]
    UnknownSession,
}

/// Live admin sessions; a session exists from `login` until `logout`.
pub struct AdminSessions {
    credentials: AdminConfig,
    active: Mutex<HashMap<SessionToken, AdminSession>>,
}

impl AdminSessions {
    pub fn new(credentials: AdminConfig) -> Self {
        Self {
            credentials,
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AdminSession, AuthError> {
        let Some(expected_password) = self.credentials.password.as_deref() else {
            return Err(AuthError::LoginDisabled);
        };

        let email_ok = self.credentials.email.eq_ignore_ascii_case(email.trim());
        let password_ok = constant_time_eq(expected_password, password);
        if !(email_ok && password_ok) {
            warn!("rejected admin login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let session = AdminSession {
            token: SessionToken::generate(),
            email: self.credentials.email.clone(),
            issued_at: Utc::now(),
        };
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.token.clone(), session.clone());

        info!(email = %session.email, "admin session opened");
        Ok(session)
    }

    /// Returns whether a session was actually closed.
    pub fn logout(&self, token: &str) -> bool {
        let removed = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&SessionToken(token.to_string()));
        if removed.is_some() {
            info!("admin session closed");
        }
        removed.is_some()
    }

    pub fn authorize(&self, token: &str) -> Result<AdminSession, AuthError> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&SessionToken(token.to_string()))
            .cloned()
            .ok_or(AuthError::UnknownSession)
    }

    pub fn authorize_headers(&self, headers: &HeaderMap) -> Result<AdminSession, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        self.authorize(token)
    }

    pub fn active_count(&self) -> usize {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}
