use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PriceRecord;

pub const MOVING_AVERAGE_METHOD: &str = "3-day moving average";

/// Response body of `GET /api/predict/{symbol}`.
///
/// Built per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub symbol: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub change_percent: f64,
    pub confidence: u8,
    pub historical_prices: Vec<f64>,
    pub prediction_method: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub symbol: String,
    pub data: Vec<PriceRecord>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SymbolsResponse {
    pub symbols: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
