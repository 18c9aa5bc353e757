//! Resource routes

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use docsign_core::{DocSignError, ResourceContents, ResourceDefinition};

use crate::AppState;

/// `GET /resources` response
#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub resources: Vec<ResourceDefinition>,
}

/// List resource definitions
pub async fn list_resources(State(state): State<Arc<AppState>>) -> Json<ResourcesResponse> {
    Json(ResourcesResponse {
        resources: state.resources.list_resources(),
    })
}

/// Read one resource; the URI arrives percent-encoded in the path
pub async fn read_resource(
    State(state): State<Arc<AppState>>,
    uri: Result<Path<String>, PathRejection>,
) -> (StatusCode, Json<ResourceContents>) {
    let uri = match uri {
        Ok(Path(uri)) => uri,
        Err(rejection) => {
            let err = DocSignError::InvalidResourceUri {
                reason: rejection.body_text(),
            };
            tracing::debug!(error = %err, "rejected resource path");
            return (StatusCode::BAD_REQUEST, Json(ResourceContents::empty()));
        }
    };

    match state.resources.read_resource(&uri).await {
        Ok(contents) => (StatusCode::OK, Json(contents)),
        Err(DocSignError::ResourceNotFound { .. }) => {
            (StatusCode::NOT_FOUND, Json(ResourceContents::empty()))
        }
        Err(e) => {
            tracing::error!(uri = %uri, error = %e, "resource read failed");
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ResourceContents::empty()))
        }
    }
}
