use chrono::Utc;
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::price_source::PriceSource;
use crate::models::{date_series, Prediction};
use crate::services::{predictor, price_service};
use crate::store::PriceStore;

/// Fetch, persist best-effort, then predict.
pub async fn predict_symbol(
    source: &dyn PriceSource,
    store: &dyn PriceStore,
    symbol: &str,
) -> Result<Prediction, AppError> {
    let symbol = symbol.trim().to_uppercase();

    let prices = source.fetch_series(&symbol).await.map_err(|e| {
        error!("Failed to fetch prices for {}: {}", symbol, e);
        AppError::Internal(e.to_string())
    })?;

    if prices.is_empty() {
        return Err(AppError::NotFound("No data available for symbol".to_string()));
    }

    let now = Utc::now();
    let dated = date_series(&prices, now.date_naive());
    if !price_service::persist_series(store, &symbol, &dated).await {
        info!("Continuing prediction for {} without persistence", symbol);
    }

    predictor::predict(&symbol, prices, now).map_err(|e| {
        error!("Prediction failed for {}: {}", symbol, e);
        AppError::Internal(e.to_string())
    })
}
