use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Connection, FromRow, PgConnection};
use tracing::error;
use uuid::Uuid;

use crate::models::{DatedPrice, PriceRecord};

#[derive(Debug, FromRow)]
pub struct StockPriceRow {
    pub symbol: String,
    pub price: BigDecimal,
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}

impl StockPriceRow {
    pub fn into_record(self) -> Option<PriceRecord> {
        Some(PriceRecord {
            price: self.price.to_f64()?,
            symbol: self.symbol,
            date: self.date,
            recorded_at: self.recorded_at,
        })
    }
}

/// Prices are stored as NUMERIC(10,2).
pub fn to_numeric(price: f64) -> Result<BigDecimal, sqlx::Error> {
    format!("{:.2}", price).parse::<BigDecimal>().map_err(|e| {
        sqlx::Error::Protocol(format!(
            "price {} is not representable as NUMERIC(10,2): {}",
            price, e
        ))
    })
}

pub async fn upsert_prices(
    conn: &mut PgConnection,
    symbol: &str,
    points: &[DatedPrice],
) -> Result<(), sqlx::Error> {
    let mut tx = conn.begin().await.map_err(|e| {
        error!("Failed to begin transaction for symbol {}: {}", symbol, e);
        e
    })?;

    for (i, p) in points.iter().enumerate() {
        if let Err(e) = sqlx::query(
            r#"
            INSERT INTO stock_prices (id, symbol, price, date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (symbol, date)
            DO UPDATE SET price = EXCLUDED.price, recorded_at = now()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(symbol)
        .bind(to_numeric(p.price)?)
        .bind(p.date)
        .execute(&mut *tx)
        .await
        {
            error!(
                "Failed to upsert price {} for symbol {} (date: {}, price: {}): {}",
                i, symbol, p.date, p.price, e
            );
            return Err(e);
        }
    }

    tx.commit().await.map_err(|e| {
        error!("Failed to commit transaction for symbol {}: {}", symbol, e);
        e
    })?;
    Ok(())
}

/// Most recent `limit` rows for a symbol, newest date first.
pub async fn fetch_recent(
    conn: &mut PgConnection,
    symbol: &str,
    limit: i64,
) -> Result<Vec<StockPriceRow>, sqlx::Error> {
    sqlx::query_as::<_, StockPriceRow>(
        r#"
        SELECT symbol, price, date, recorded_at
        FROM stock_prices
        WHERE symbol = $1
        ORDER BY date DESC
        LIMIT $2
        "#,
    )
    .bind(symbol)
    .bind(limit)
    .fetch_all(&mut *conn)
    .await
}
