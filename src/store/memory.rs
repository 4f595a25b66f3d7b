use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;

use crate::models::{DatedPrice, PriceRecord};
use crate::store::{PriceStore, StoreError};

/// Process-local store with the same keying as the SQL table.
#[derive(Clone, Default)]
pub struct InMemoryPriceStore {
    rows: Arc<DashMap<String, BTreeMap<NaiveDate, PriceRecord>>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    async fn upsert(&self, symbol: &str, points: &[DatedPrice]) -> Result<(), StoreError> {
        let recorded_at = Utc::now();
        let mut by_date = self.rows.entry(symbol.to_string()).or_default();

        for p in points {
            by_date.insert(
                p.date,
                PriceRecord {
                    symbol: symbol.to_string(),
                    price: p.price,
                    date: p.date,
                    recorded_at,
                },
            );
        }
        Ok(())
    }

    async fn history(&self, symbol: &str, limit: i64) -> Result<Vec<PriceRecord>, StoreError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let records = self
            .rows
            .get(symbol)
            .map(|by_date| by_date.values().rev().take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_HISTORY_LIMIT;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_then_history_round_trip() {
        let store = InMemoryPriceStore::new();
        store
            .upsert("AAPL", &[DatedPrice { date: day(1), price: 150.0 }])
            .await
            .unwrap();

        let history = store.history("AAPL", DEFAULT_HISTORY_LIMIT).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].symbol, "AAPL");
        assert_eq!(history[0].date, day(1));
        assert_eq!(history[0].price, 150.0);
    }

    #[tokio::test]
    async fn test_upsert_same_date_overwrites_price() {
        let store = InMemoryPriceStore::new();
        store
            .upsert("AAPL", &[DatedPrice { date: day(1), price: 150.0 }])
            .await
            .unwrap();
        store
            .upsert("AAPL", &[DatedPrice { date: day(1), price: 151.25 }])
            .await
            .unwrap();

        let history = store.history("AAPL", DEFAULT_HISTORY_LIMIT).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].price, 151.25);
    }

    #[tokio::test]
    async fn test_history_newest_first_and_limited() {
        let store = InMemoryPriceStore::new();
        let points: Vec<DatedPrice> = (1..=10)
            .map(|d| DatedPrice { date: day(d), price: d as f64 })
            .collect();
        store.upsert("MSFT", &points).await.unwrap();

        let history = store.history("MSFT", 3).await.unwrap();
        let dates: Vec<NaiveDate> = history.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(10), day(9), day(8)]);
    }

    #[tokio::test]
    async fn test_symbols_are_isolated() {
        let store = InMemoryPriceStore::new();
        store
            .upsert("TSLA", &[DatedPrice { date: day(2), price: 200.0 }])
            .await
            .unwrap();

        assert!(store.history("AMZN", DEFAULT_HISTORY_LIMIT).await.unwrap().is_empty());
        assert!(store.history("TSLA", 0).await.unwrap().is_empty());
    }
}
