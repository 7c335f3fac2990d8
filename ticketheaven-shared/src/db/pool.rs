//! Database connection handle
//!
//! The form runs one action at a time, so the handle is a sqlx pool capped at
//! a single connection with no idle connections kept warm. Gateways acquire
//! the connection for the length of one operation and release it when the
//! operation returns.
//!
//! # Example
//!
//! ```no_run
//! use ticketheaven_shared::db::pool::{close_pool, connect, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         options: "postgresql://postgres@localhost/TicketHeaven".parse()?,
//!         ..Default::default()
//!     };
//!
//!     let pool = connect(config).await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT $1")
//!         .bind(42i64)
//!         .fetch_one(&pool)
//!         .await?;
//!
//!     close_pool(pool).await;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DatabaseSettings};

/// Configuration for the database handle
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where and how to connect
    pub options: PgConnectOptions,

    /// Maximum number of open connections
    ///
    /// Default: 1 (one form action at a time)
    pub max_connections: u32,

    /// Timeout for acquiring a connection (seconds)
    ///
    /// Default: 30 seconds
    pub acquire_timeout_seconds: u64,

    /// Whether to test the connection before handing it out
    ///
    /// Default: true
    pub test_before_acquire: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            options: PgConnectOptions::new(),
            max_connections: 1,
            acquire_timeout_seconds: 30,
            test_before_acquire: true,
        }
    }
}

impl DatabaseConfig {
    /// Builds a handle configuration from environment settings
    pub fn from_settings(settings: &DatabaseSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            options: settings.connect_options()?,
            acquire_timeout_seconds: settings.acquire_timeout_seconds,
            ..Default::default()
        })
    }
}

/// Opens the database handle and checks that the server answers
///
/// # Errors
///
/// Returns an error if the server is unreachable, the credentials are
/// rejected, or the health check fails.
pub async fn connect(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        acquire_timeout_seconds = config.acquire_timeout_seconds,
        "Opening database handle"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .test_before_acquire(config.test_before_acquire)
        .connect_with(config.options)
        .await?;

    health_check(&pool).await?;

    info!("Database handle ready");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Closes the handle and waits for the connection to shut down
pub async fn close_pool(pool: PgPool) {
    debug!("Closing database handle");
    pool.close().await;
    debug!("Database handle closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.acquire_timeout_seconds, 30);
        assert!(config.test_before_acquire);
    }

    #[test]
    fn test_from_settings_carries_timeout() {
        let settings = DatabaseSettings {
            acquire_timeout_seconds: 7,
            ..Default::default()
        };

        let config = DatabaseConfig::from_settings(&settings).unwrap();
        assert_eq!(config.acquire_timeout_seconds, 7);
        assert_eq!(config.max_connections, 1);
    }

    // Integration tests require a running database
    // These are in the tests/ directory and run with `cargo test -- --ignored`
}
