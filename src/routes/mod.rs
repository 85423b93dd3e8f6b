//! API route handlers, one module per configuration domain.

pub mod auth;
pub mod config;
pub mod health;
pub mod settings;
pub mod tools;
pub mod upload;

use axum::http::HeaderMap;
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::store::{ConfigStore, MediaStore};
use crate::AppState;

pub use crate::error::ErrorResponse;

/// Reject the request unless it carries a valid admin session. Must run
/// before any store access in mutating handlers.
pub(crate) fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if state.sessions.is_authorized(headers) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

pub(crate) fn config_store(state: &AppState) -> Result<&dyn ConfigStore, ApiError> {
    state
        .config
        .as_deref()
        .ok_or(ApiError::DependencyMissing("config store"))
}

pub(crate) fn media_store(state: &AppState) -> Result<&dyn MediaStore, ApiError> {
    state
        .media
        .as_deref()
        .ok_or(ApiError::DependencyMissing("media store"))
}

/// Parse a JSON request body, mapping any parse failure to a 400.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|_| ApiError::Validation("Invalid JSON body".to_string()))
}

/// Entity identifier: current Unix time in milliseconds, as a string.
/// Same-millisecond collisions are accepted as negligible.
pub(crate) fn now_millis_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
