//! Liveness endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub config_store: ServiceCheck,
    pub media_store: ServiceCheck,
}

/// GET /health
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/detailed
///
/// Overall status stays "ok" as long as the process is serving; the checks
/// tell the dashboard which stores are reachable.
pub async fn health_detailed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config_store = match state.config.as_deref() {
        Some(store) => {
            let start = Instant::now();
            match store.get(keys::HERO).await {
                Ok(_) => ServiceCheck {
                    status: "healthy".to_string(),
                    response_time: Some(start.elapsed().as_millis() as u64),
                    error: None,
                },
                Err(err) => ServiceCheck {
                    status: "unhealthy".to_string(),
                    response_time: None,
                    error: Some(err.to_string()),
                },
            }
        }
        None => ServiceCheck {
            status: "unhealthy".to_string(),
            response_time: None,
            error: Some("config store not configured".to_string()),
        },
    };

    let media_store = if state.media.is_some() {
        ServiceCheck {
            status: "healthy".to_string(),
            response_time: None,
            error: None,
        }
    } else {
        ServiceCheck {
            status: "unhealthy".to_string(),
            response_time: None,
            error: Some("media store not configured".to_string()),
        }
    };

    (
        StatusCode::OK,
        Json(DetailedHealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                config_store,
                media_store,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{send, test_app, unbound_app};

    #[tokio::test]
    async fn ping_returns_ok() {
        let app = test_app();
        let (status, bytes) = send(app.router(), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let body: SimpleHealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn detailed_reports_store_health() {
        let app = test_app();
        let (status, bytes) = send(app.router(), "GET", "/health/detailed", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let body: DetailedHealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "ok");
        assert_eq!(body.checks.config_store.status, "healthy");
        assert_eq!(body.checks.media_store.status, "healthy");
    }

    #[tokio::test]
    async fn detailed_flags_missing_bindings() {
        let (status, bytes) = send(unbound_app(), "GET", "/health/detailed", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let body: DetailedHealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.checks.config_store.status, "unhealthy");
        assert_eq!(body.checks.media_store.status, "unhealthy");
    }
}
