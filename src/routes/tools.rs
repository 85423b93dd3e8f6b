//! Tools list: GET returns the stored list, POST appends a new entry.
//!
//! The list is append-only; there is no update or delete path. The append is
//! a plain read-modify-write, so concurrent appends can lose updates. That
//! race is accepted behavior (single admin), see README.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::{config_store, now_millis_id, require_admin};
use crate::store::{keys, read_json_lossy, write_json};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub icon_url: String,
    pub preview_url: String,
}

/// `tags` accepts either an array of strings or a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Csv(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToolRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<TagsField>,
    pub icon_url: Option<String>,
    pub preview_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateToolResponse {
    pub success: bool,
    pub tool: Tool,
    pub tools: Vec<Tool>,
}

fn normalize_tags(tags: Option<TagsField>) -> Vec<String> {
    match tags {
        Some(TagsField::List(items)) => items,
        Some(TagsField::Csv(csv)) => csv
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    }
}

/// GET /api/admin/tools
pub async fn list_tools(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ToolListResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;
    let tools = read_json_lossy(store, keys::TOOLS, Vec::new).await;
    Ok(Json(ToolListResponse { tools }))
}

/// POST /api/admin/tools
pub async fn create_tool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<CreateToolResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let store = config_store(&state)?;

    // An unparseable body is treated the same as one with no title.
    let payload: CreateToolRequest = serde_json::from_str(&body).unwrap_or_default();

    let title = payload.title.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }

    let tool = Tool {
        id: now_millis_id(),
        title,
        description: payload
            .description
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
        tags: normalize_tags(payload.tags),
        icon_url: payload.icon_url.as_deref().unwrap_or("").trim().to_string(),
        preview_url: payload
            .preview_url
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
    };

    let mut tools: Vec<Tool> = read_json_lossy(store, keys::TOOLS, Vec::new).await;
    tools.push(tool.clone());
    write_json(store, keys::TOOLS, &tools).await?;

    tracing::info!(tool_id = %tool.id, "tool appended");
    Ok(Json(CreateToolResponse {
        success: true,
        tool,
        tools,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use crate::routes::testing::{send, send_json, test_app, ADMIN_COOKIE};
    use crate::store::ConfigStore;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn missing_title_is_rejected() {
        let app = test_app();
        let (status, bytes) = send_json(
            app.router(),
            "POST",
            "/api/admin/tools",
            Some(ADMIN_COOKIE),
            &json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "title is required");
        assert_eq!(app.config.get("tools").await.unwrap(), None);
    }

    #[tokio::test]
    async fn title_only_tool_gets_empty_defaults() {
        let app = test_app();
        let (status, bytes) = send_json(
            app.router(),
            "POST",
            "/api/admin/tools",
            Some(ADMIN_COOKIE),
            &json!({"title": "X"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: CreateToolResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.tool.title, "X");
        assert!(body.tool.tags.is_empty());
        assert_eq!(body.tool.description, "");
        assert_eq!(body.tool.icon_url, "");
        assert_eq!(body.tools.len(), 1);
    }

    #[tokio::test]
    async fn csv_tags_are_split_and_trimmed() {
        let app = test_app();
        let (_, bytes) = send_json(
            app.router(),
            "POST",
            "/api/admin/tools",
            Some(ADMIN_COOKIE),
            &json!({"title": "T", "tags": " a, b ,, c "}),
        )
        .await;
        let body: CreateToolResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.tool.tags, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn array_tags_are_kept_as_is() {
        let app = test_app();
        let (_, bytes) = send_json(
            app.router(),
            "POST",
            "/api/admin/tools",
            Some(ADMIN_COOKIE),
            &json!({"title": "T", "tags": ["x", "y"]}),
        )
        .await;
        let body: CreateToolResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.tool.tags, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn sequential_appends_preserve_insertion_order() {
        let app = test_app();
        for title in ["first", "second", "third"] {
            let (status, _) = send_json(
                app.router(),
                "POST",
                "/api/admin/tools",
                Some(ADMIN_COOKIE),
                &json!({"title": title}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            // ids are millisecond timestamps; space the appends out so they
            // are strictly comparable
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let (status, bytes) =
            send(app.router(), "GET", "/api/admin/tools", Some(ADMIN_COOKIE), None).await;
        assert_eq!(status, StatusCode::OK);
        let body: ToolListResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.tools.len(), 3);
        assert_eq!(
            body.tools.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            vec!["first", "second", "third"]
        );

        let ids: Vec<i64> = body
            .tools
            .iter()
            .map(|t| t.id.parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] <= w[1]));
        let mut unique = ids.clone();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[tokio::test]
    async fn malformed_stored_list_reads_as_empty() {
        let app = test_app();
        app.config.put("tools", "{broken").await.unwrap();
        let (status, bytes) =
            send(app.router(), "GET", "/api/admin/tools", Some(ADMIN_COOKIE), None).await;
        assert_eq!(status, StatusCode::OK);
        let body: ToolListResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.tools.is_empty());
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let app = test_app();
        let (status, _) = send(
            app.router(),
            "DELETE",
            "/api/admin/tools",
            Some(ADMIN_COOKIE),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unauthenticated_requests_are_rejected() {
        let app = test_app();
        let (status, _) = send(app.router(), "GET", "/api/admin/tools", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send_json(
            app.router(),
            "POST",
            "/api/admin/tools",
            None,
            &json!({"title": "X"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.config.get("tools").await.unwrap(), None);
    }
}
