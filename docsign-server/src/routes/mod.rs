//! HTTP route handlers

mod resources;
mod tools;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{AppState, ServerConfig};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/tools", get(tools::list_tools))
        .route("/call", post(tools::call_tool))
        .route("/resources", get(resources::list_resources))
        .route("/resources/*uri", get(resources::read_resource))
        .with_state(state);

    let base = config.normalized_base_path();
    let router = Router::new().route("/health", get(health));
    // nest() rejects an empty or root prefix
    let router = if base.is_empty() {
        router.merge(api)
    } else {
        router.nest(&base, api)
    };

    let router = router.layer(TraceLayer::new_for_http());
    if config.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
