use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceSourceError {
    #[error("network error: {0}")]
    Network(String),
}

/// Supplier of daily closing prices, oldest first.
///
/// Implementations accept symbols in any case. An empty series means the
/// source knows nothing about the symbol.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_series(&self, symbol: &str) -> Result<Vec<f64>, PriceSourceError>;
}
