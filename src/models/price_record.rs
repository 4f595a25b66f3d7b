use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored closing price for one symbol on one calendar date.
///
/// `(symbol, date)` is the identity; writing the same key again replaces `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub symbol: String,
    pub price: f64,
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}

/// A price from a series with its calendar date attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedPrice {
    pub date: NaiveDate,
    pub price: f64,
}

/// Attach consecutive calendar dates to a chronological series so that the
/// last price lands on `today`.
pub fn date_series(prices: &[f64], today: NaiveDate) -> Vec<DatedPrice> {
    let n = prices.len() as i64;
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| DatedPrice {
            date: today - Duration::days(n - 1 - i as i64),
            price,
        })
        .collect()
}
