use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;
use std::time::Duration;

pub mod entities;

/// Re-export for convenience
pub use sea_orm;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL`, falling back to a URL assembled from
    /// `DB_USER`, `DB_PASSWORD`, `DB_HOST` (host:port) and `DB_NAME`.
    pub fn from_env() -> Self {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let url = postgres_url(
                    &env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
                    &env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
                    &env::var("DB_HOST").unwrap_or_else(|_| "localhost:5432".to_string()),
                    &env::var("DB_NAME").unwrap_or_else(|_| "fyyur".to_string()),
                );
                tracing::debug!("DATABASE_URL not set, using connection parts from env");
                url
            }
        };

        Self {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 1),
            connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT", 8),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT", 300),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Build a postgres connection string from its parts.
pub fn postgres_url(user: &str, password: &str, host: &str, database: &str) -> String {
    format!("postgres://{user}:{password}@{host}/{database}")
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Signing key for flash notifications. Fixed for the process lifetime.
    pub secret_key: String,
}

/// Connect to the database and return a connection pool
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(&config.url);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    Database::connect(opt).await
}
