//! Password hashing, session tokens and the authenticated-user extractor.

use std::collections::HashMap;
use std::time::Duration as StdDuration;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use studyplan_models::{User, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "auth_token";

/// Hashes a password with bcrypt at the given work factor.
///
/// CPU bound; call it from a blocking task.
pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    bcrypt::hash(password, cost)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
}

/// Checks a password against a stored user's bcrypt hash.
///
/// A malformed stored hash never matches.
pub fn verify_password(user: &User, password: &str) -> bool {
    bcrypt::verify(password, &user.password_hash).unwrap_or_else(|e| {
        warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
        false
    })
}

#[derive(Debug, Clone)]
struct Session {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// In-memory table of live session tokens.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store whose sessions last `ttl`.
    pub fn new(ttl: StdDuration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(7)),
        }
    }

    /// Starts a session for `user_id` and returns its token.
    pub async fn create(&self, user_id: &UserId) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id: user_id.clone(),
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Resolves a token to its user. Expired sessions are dropped.
    pub async fn resolve(&self, token: &str) -> Option<UserId> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(s) if s.expires_at > now => return Some(s.user_id.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        debug!("Dropping expired session");
        self.sessions.write().await.remove(token);
        None
    }

    /// Ends a session. Unknown tokens are ignored.
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Seconds a new session stays valid.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

/// Extracts the session token from the `auth_token` cookie or an
/// `Authorization: Bearer` header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    from_cookie
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
        })
        .filter(|t| !t.is_empty())
}

/// `Set-Cookie` value that stores a session token.
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    )
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// The user behind the request's session token.
///
/// Rejects with 401 when the token is missing, unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let user_id = state
            .sessions
            .resolve(&token)
            .await
            .ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser { user_id, token })
    }
}
