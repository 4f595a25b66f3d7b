use tracing::{info, warn};

use crate::models::{DatedPrice, PriceRecord};
use crate::store::{PriceStore, StoreError};

pub const STORE_UNAVAILABLE_MESSAGE: &str = "Database not available - using mock data";
pub const STORE_ERROR_MESSAGE: &str = "Database error - using mock data";

/// Outcome of a history read. `message` is set only when the store failed.
#[derive(Debug)]
pub struct HistoryLookup {
    pub records: Vec<PriceRecord>,
    pub message: Option<String>,
}

/// Write-through of a fetched series. Store failures never reach the caller.
pub async fn persist_series(store: &dyn PriceStore, symbol: &str, points: &[DatedPrice]) -> bool {
    match store.upsert(symbol, points).await {
        Ok(()) => {
            info!("✓ Stored {} prices for {}", points.len(), symbol);
            true
        }
        Err(e) => {
            warn!("Skipping price storage for {}: {}", symbol, e);
            false
        }
    }
}

pub async fn get_history(store: &dyn PriceStore, symbol: &str, limit: i64) -> HistoryLookup {
    match store.history(symbol, limit).await {
        Ok(records) => HistoryLookup {
            records,
            message: None,
        },
        Err(e) => {
            warn!("History for {} unavailable: {}", symbol, e);
            let message = match e {
                StoreError::Unavailable(_) => STORE_UNAVAILABLE_MESSAGE,
                StoreError::Query(_) => STORE_ERROR_MESSAGE,
            };
            HistoryLookup {
                records: Vec::new(),
                message: Some(message.to_string()),
            }
        }
    }
}
