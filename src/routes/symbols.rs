use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::SymbolsResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_symbols))
}

async fn list_symbols(State(state): State<AppState>) -> Json<SymbolsResponse> {
    info!("GET /api/symbols - Listing symbol catalog");
    Json(SymbolsResponse {
        symbols: state.symbols.as_ref().clone(),
    })
}
