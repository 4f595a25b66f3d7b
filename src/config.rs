use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use tracing::warn;

pub const DEFAULT_SYMBOLS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN"];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Connection parameters for the price store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "root".to_string(),
            password: "password".to_string(),
            name: "stock_prediction".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 3,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "Invalid STORE_BACKEND: {}. Must be 'postgres' or 'memory'",
                other
            )),
        }
    }
}

/// Everything the service needs at startup, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub store_backend: StoreBackend,
    pub symbols: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            store_backend: StoreBackend::Postgres,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.server.host),
            port: parse_or("PORT", &lookup, defaults.server.port),
        };

        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or(defaults.database.host),
            port: parse_or("DB_PORT", &lookup, defaults.database.port),
            user: lookup("DB_USER").unwrap_or(defaults.database.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.database.password),
            name: lookup("DB_NAME").unwrap_or(defaults.database.name),
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                &lookup,
                defaults.database.max_connections,
            ),
            acquire_timeout_secs: parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                &lookup,
                defaults.database.acquire_timeout_secs,
            ),
        };

        let store_backend = parse_or("STORE_BACKEND", &lookup, defaults.store_backend);

        Self {
            server,
            database,
            store_backend,
            symbols: defaults.symbols,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring invalid {}={:?}: {}", key, raw, e);
            default
        }),
        None => default,
    }
}
