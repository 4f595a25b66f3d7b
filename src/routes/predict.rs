use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::Prediction;
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol", get(predict))
}

pub async fn predict(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Prediction>, AppError> {
    info!("GET /api/predict/{} - Predicting next price", symbol);
    let prediction = services::prediction_service::predict_symbol(
        state.price_source.as_ref(),
        state.price_store.as_ref(),
        &symbol,
    )
    .await?;
    Ok(Json(prediction))
}
