mod app;
mod config;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::{AppConfig, StoreBackend};
use crate::external::mock_source::MockPriceSource;
use crate::logging::LoggingConfig;
use crate::state::AppState;
use crate::store::{InMemoryPriceStore, PgPriceStore, PriceStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env();

    let price_store: Arc<dyn PriceStore> = match config.store_backend {
        StoreBackend::Postgres => {
            tracing::info!(
                "🗄️ Using PostgreSQL store at {}:{}/{}",
                config.database.host,
                config.database.port,
                config.database.name
            );
            let store = PgPriceStore::new(&config.database);
            store.migrate().await;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::info!("🗄️ Using in-memory store");
            Arc::new(InMemoryPriceStore::new())
        }
    };

    let state = AppState {
        price_source: Arc::new(MockPriceSource::new()),
        price_store,
        symbols: Arc::new(config.symbols.clone()),
    };
    let app = app::create_app(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Stockify backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
