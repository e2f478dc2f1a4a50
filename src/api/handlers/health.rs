use crate::AppState;
use crate::api::response::ApiResponse;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let db_status = if state.db.ping().await.is_ok() {
        "connected"
    } else {
        "disconnected"
    };

    let storage_status = if state.storage.is_available().await {
        "available"
    } else {
        "unavailable"
    };

    ApiResponse::data(HealthResponse {
        status: "ok".to_string(),
        database: db_status.to_string(),
        storage: storage_status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
    .with_message("Blog API is running")
}

/// Service banner with the endpoint map
pub async fn index() -> ApiResponse<Value> {
    ApiResponse::data(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "articles": "/api/articles",
            "comments": "/api/comments",
            "upload": "/api/upload",
            "health": "/api/health",
            "docs": "/swagger-ui"
        }
    }))
    .with_message("Welcome to the blog API")
}
