use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::db;
use crate::models::{DatedPrice, PriceRecord};
use crate::store::{PriceStore, StoreError};

/// PostgreSQL-backed price store.
///
/// The pool connects lazily, so a database that is down at startup only
/// degrades store calls instead of failing the process.
#[derive(Clone)]
pub struct PgPriceStore {
    pool: PgPool,
}

impl PgPriceStore {
    pub fn new(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(config.connect_options());
        Self { pool }
    }

    /// Apply the embedded migrations. Failure is logged and otherwise ignored.
    pub async fn migrate(&self) {
        match sqlx::migrate!().run(&self.pool).await {
            Ok(()) => info!("✓ stock_prices schema is up to date"),
            Err(e) => warn!("Skipping migrations, store not reachable: {}", e),
        }
    }

    /// Returned to the pool when dropped.
    async fn acquire(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        self.pool.acquire().await.map_err(StoreError::from)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(value.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[async_trait]
impl PriceStore for PgPriceStore {
    async fn upsert(&self, symbol: &str, points: &[DatedPrice]) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        db::price_queries::upsert_prices(&mut conn, symbol, points).await?;
        Ok(())
    }

    async fn history(&self, symbol: &str, limit: i64) -> Result<Vec<PriceRecord>, StoreError> {
        let mut conn = self.acquire().await?;
        let rows = db::price_queries::fetch_recent(&mut conn, symbol, limit).await?;

        rows.into_iter()
            .map(|row| {
                let date = row.date;
                row.into_record().ok_or_else(|| {
                    StoreError::Query(format!("price for {} on {} is not representable", symbol, date))
                })
            })
            .collect()
    }
}
