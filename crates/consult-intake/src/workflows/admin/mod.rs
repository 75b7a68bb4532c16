//! Explicit admin sessions gating the dashboard routes.

mod session;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

pub use session::{bearer_token, AdminSession, AdminSessions, AuthError, SessionToken};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Router exposing login and logout.
pub fn admin_router(sessions: Arc<AdminSessions>) -> Router {
    Router::new()
        .route("/api/v1/admin/login", post(login_handler))
        .route("/api/v1/admin/logout", post(logout_handler))
        .with_state(sessions)
}

pub(crate) async fn login_handler(
    State(sessions): State<Arc<AdminSessions>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match sessions.login(&request.email, &request.password) {
        Ok(session) => (
            StatusCode::OK,
            Json(json!({
                "token": session.token.as_str(),
                "email": session.email,
                "issued_at": session.issued_at,
            })),
        )
            .into_response(),
        Err(error) => auth_failure(error),
    }
}

pub(crate) async fn logout_handler(
    State(sessions): State<Arc<AdminSessions>>,
    headers: HeaderMap,
) -> Response {
    match bearer_token(&headers) {
        Some(token) if sessions.logout(token) => StatusCode::NO_CONTENT.into_response(),
        Some(_) => auth_failure(AuthError::UnknownSession),
        None => auth_failure(AuthError::MissingToken),
    }
}

/// Uniform rejection for admin routes.
pub(crate) fn auth_failure(error: AuthError) -> Response {
    let status = match error {
        AuthError::LoginDisabled => StatusCode::SERVICE_UNAVAILABLE,
        AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::UnknownSession => {
            StatusCode::UNAUTHORIZED
        }
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
