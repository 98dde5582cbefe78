//! Account and session handlers.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderName, StatusCode},
    Json,
};
use chrono::Utc;
use tracing::info;

use studyplan_models::{User, UserId};
use studyplan_persistence::PersistenceError;

use crate::auth::{clear_cookie, hash_password, session_cookie, verify_password, AuthUser};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{CredentialsRequest, SessionResponse, StatusResponse};

type WithCookie<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

fn credentials(req: CredentialsRequest) -> Option<(String, String)> {
    let username = req.username.unwrap_or_default().trim().to_string();
    let password = req.password.unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some((username, password))
}

async fn start_session(
    state: &AppState,
    status: StatusCode,
    user: &User,
) -> WithCookie<SessionResponse> {
    let token = state.sessions.create(&user.id).await;
    let cookie = session_cookie(&token, state.sessions.ttl_seconds());
    (
        status,
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            token,
        }),
    )
}

/// POST /api/auth/register - Create an account and log in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<WithCookie<SessionResponse>> {
    let (username, password) = credentials(req)
        .ok_or_else(|| ApiError::BadRequest("username and password are required".to_string()))?;

    let cost = state.config.password_cost;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("password hashing task failed: {}", e)))??;
    let user = User {
        id: UserId::new(),
        username,
        password_hash,
        created_at: Utc::now(),
    };

    state.users.create(&user).map_err(|e| match e {
        PersistenceError::Conflict { .. } => ApiError::BadRequest("username taken".to_string()),
        other => other.into(),
    })?;
    info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(start_session(&state, StatusCode::CREATED, &user).await)
}

/// POST /api/auth/login - Start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<WithCookie<SessionResponse>> {
    let (username, password) = credentials(req).ok_or(ApiError::Unauthorized)?;

    let user = state
        .users
        .find_by_username(&username)?
        .ok_or(ApiError::Unauthorized)?;
    let user = tokio::task::spawn_blocking(move || verify_password(&user, &password).then_some(user))
        .await
        .map_err(|e| ApiError::Internal(format!("password check task failed: {}", e)))?
        .ok_or(ApiError::Unauthorized)?;

    Ok(start_session(&state, StatusCode::OK, &user).await)
}

/// POST /api/auth/logout - End the current session.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> WithCookie<StatusResponse> {
    state.sessions.revoke(&auth.token).await;
    (
        StatusCode::OK,
        [(SET_COOKIE, clear_cookie())],
        Json(StatusResponse::new("logged_out")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::make_test_state;

    fn creds(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = make_test_state();

        let (status, _, Json(created)) = register(State(state.clone()), Json(creds(" ada ", "pw")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.username, "ada");

        let (status, [(_, cookie)], Json(session)) =
            login(State(state.clone()), Json(creds("ada", "pw"))).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(cookie.starts_with(&format!("auth_token={}", session.token)));
        assert_eq!(session.user_id, created.user_id);

        let stored = state.users.find_by_username("ada").unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$2b$"));
        assert_ne!(stored.password_hash, "pw");
    }

    #[tokio::test]
    async fn test_register_rejects_missing_and_taken() {
        let state = make_test_state();

        let result = register(State(state.clone()), Json(creds("", "pw"))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        register(State(state.clone()), Json(creds("ada", "pw"))).await.unwrap();
        let result = register(State(state), Json(creds("ada", "other"))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let state = make_test_state();
        register(State(state.clone()), Json(creds("ada", "pw"))).await.unwrap();

        let result = login(State(state.clone()), Json(creds("ada", "wrong"))).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));

        let result = login(State(state), Json(creds("nobody", "pw"))).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
