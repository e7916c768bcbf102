//! Process configuration read from the environment.

use std::env;
use std::net::{AddrParseError, SocketAddr};

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::Rng;
use sea_orm::DatabaseConnection;
use thiserror::Error;

use fyyur_db::{AppState, DatabaseConfig};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid FYYUR_BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Signs flash cookies. Generated once per process when unset.
    pub secret_key: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = match env::var("FYYUR_SECRET_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!(
                    "FYYUR_SECRET_KEY not set, generating a random key; \
                     pending notifications will not survive a restart"
                );
                generate_secret_key()
            }
        };

        let bind = env::var("FYYUR_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = parse_bind_addr(&bind)?;

        Ok(Self {
            database: DatabaseConfig::from_env(),
            secret_key,
            bind_addr,
        })
    }

    pub fn into_state(self, db: DatabaseConnection) -> AppState {
        AppState {
            db,
            secret_key: self.secret_key,
        }
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|source| ConfigError::BindAddr {
        value: value.to_string(),
        source,
    })
}

/// 32 random bytes, base64-encoded.
pub fn generate_secret_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_differ() {
        let a = generate_secret_key();
        let b = generate_secret_key();
        assert_ne!(a, b);
        assert_eq!(STANDARD.decode(&a).unwrap().len(), 32);
    }

    #[test]
    fn test_parse_bind_addr() {
        assert_eq!(
            parse_bind_addr(DEFAULT_BIND_ADDR).unwrap(),
            SocketAddr::from(([0, 0, 0, 0], 5000))
        );
        let err = parse_bind_addr("localhost").unwrap_err();
        assert!(err.to_string().contains("FYYUR_BIND_ADDR"));
    }
}
