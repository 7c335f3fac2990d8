//! Database layer for TicketHeaven
//!
//! # Modules
//!
//! - `pool`: Connection handle with health check
//! - `schema`: Database and `member` table bootstrap
//!
//! # Example
//!
//! ```no_run
//! use ticketheaven_shared::config::DatabaseSettings;
//! use ticketheaven_shared::db::pool::{connect, DatabaseConfig};
//! use ticketheaven_shared::db::schema::ensure_member_table;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_settings(&DatabaseSettings::from_env()?)?;
//!
//!     let pool = connect(config).await?;
//!     ensure_member_table(&pool).await?;
//!     Ok(())
//! }
//! ```

pub mod pool;
pub mod schema;
