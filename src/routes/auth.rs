//! Login and session-check endpoints for the admin dashboard.

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::parse_json_body;
use crate::session::session_cookie;
use crate::AppState;
use axum::extract::State;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// POST /api/login
///
/// Checks the submitted credentials against the configured admin account and,
/// on success, sets the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let payload: LoginRequest = parse_json_body(&body)?;

    if payload.username != state.admin_username || payload.password != state.admin_password {
        tracing::warn!("failed admin login attempt");
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!("admin logged in");
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie())],
        Json(LoginResponse { success: true }),
    ))
}

/// GET /api/admin/me
///
/// Used by the dashboard to decide whether to redirect to the login page.
pub async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if !state.sessions.is_authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(MeResponse {
                authenticated: false,
                username: None,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(MeResponse {
            authenticated: true,
            username: Some(state.admin_username.clone()),
        }),
    )
}
