//! Persistence of per-symbol daily prices.
//!
//! Every backend keys rows by `(symbol, date)` and lets the latest write win.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DatedPrice, PriceRecord};

pub use memory::InMemoryPriceStore;
pub use postgres::PgPriceStore;

/// Rows returned by a history lookup when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: i64 = 30;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),
}

#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Insert or overwrite one row per dated price.
    async fn upsert(&self, symbol: &str, points: &[DatedPrice]) -> Result<(), StoreError>;

    /// Up to `limit` rows for `symbol`, most recent date first.
    async fn history(&self, symbol: &str, limit: i64) -> Result<Vec<PriceRecord>, StoreError>;
}
