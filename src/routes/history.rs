use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::HistoryResponse;
use crate::services::price_service;
use crate::state::AppState;
use crate::store::DEFAULT_HISTORY_LIMIT;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol", get(get_history))
}

/// Always 200; an unreachable store yields an empty list plus a message.
pub async fn get_history(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
) -> Json<HistoryResponse> {
    let symbol = symbol.trim().to_uppercase();
    info!("GET /api/history/{} - Getting stored prices", symbol);

    let lookup =
        price_service::get_history(state.price_store.as_ref(), &symbol, DEFAULT_HISTORY_LIMIT).await;

    Json(HistoryResponse {
        symbol,
        count: lookup.records.len(),
        data: lookup.records,
        message: lookup.message,
    })
}
