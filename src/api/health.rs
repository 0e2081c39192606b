//! Health check handler

use axum::{response::IntoResponse, Json};

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
