use async_trait::async_trait;
use tracing::debug;

use crate::external::price_source::{PriceSource, PriceSourceError};

const MOCK_SERIES: [(&str, [f64; 5]); 5] = [
    ("AAPL", [150.0, 152.5, 151.8, 153.2, 154.1]),
    ("GOOGL", [2800.0, 2815.5, 2820.2, 2818.7, 2825.3]),
    ("MSFT", [300.0, 302.1, 301.5, 303.8, 304.2]),
    ("TSLA", [200.0, 198.5, 201.2, 199.8, 202.1]),
    ("AMZN", [3200.0, 3215.2, 3208.7, 3212.3, 3218.9]),
];

/// Served for any symbol not in the table.
pub const FALLBACK_SERIES: [f64; 5] = [100.0, 101.5, 102.2, 101.8, 103.1];

/// Static price table standing in for a market-data provider.
#[derive(Debug, Default, Clone)]
pub struct MockPriceSource;

impl MockPriceSource {
    pub fn new() -> Self {
        Self
    }

    pub fn series_for(symbol: &str) -> Vec<f64> {
        let symbol = symbol.trim().to_uppercase();
        MOCK_SERIES
            .iter()
            .find(|(known, _)| *known == symbol)
            .map(|(_, prices)| prices.to_vec())
            .unwrap_or_else(|| {
                debug!("No mock series for {}, serving fallback", symbol);
                FALLBACK_SERIES.to_vec()
            })
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_series(&self, symbol: &str) -> Result<Vec<f64>, PriceSourceError> {
        Ok(Self::series_for(symbol))
    }
}
