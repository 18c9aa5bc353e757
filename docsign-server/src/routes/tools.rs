//! Tool catalog and tool call routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use serde_json::Value;

use docsign_core::{DocSignError, ToolDefinition, ToolResult};

use crate::AppState;

/// `GET /tools` response
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDefinition>,
}

/// List the tool catalog
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.dispatcher.list_tools(),
    })
}

/// Call a tool: body `{name, arguments}`
///
/// The status follows the envelope: 200 on success, 400/404/500 by error
/// category.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ToolResult>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected /call body");
            return respond(ToolResult::from_error(&DocSignError::InvalidRequestBody {
                reason: rejection.body_text(),
            }));
        }
    };

    let name = match body.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name,
        _ => return respond(ToolResult::from_error(&DocSignError::ToolNameRequired)),
    };
    let arguments = body.get("arguments").cloned().unwrap_or(Value::Null);

    respond(state.dispatcher.call_tool(name, &arguments).await)
}

fn respond(result: ToolResult) -> (StatusCode, Json<ToolResult>) {
    let status = StatusCode::from_u16(result.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result))
}
