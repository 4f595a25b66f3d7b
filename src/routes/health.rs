use axum::{routing::get, Json, Router};
use chrono::Utc;
use tracing::info;

use crate::models::HealthResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

async fn health() -> Json<HealthResponse> {
    info!("GET /health - Health check");
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
