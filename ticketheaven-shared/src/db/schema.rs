//! Schema bootstrap
//!
//! There is one table and no schema history, so bootstrapping is a single
//! idempotent `CREATE TABLE IF NOT EXISTS`. The unique constraints back the
//! service's duplicate check if another writer gets in between the check
//! and the write. The constraint names are Postgres' defaults
//! (`member_username_key`, `member_email_key`, `member_phonenumber_key`).

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

const CREATE_MEMBER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS member (
        userid      SERIAL PRIMARY KEY,
        username    TEXT NOT NULL UNIQUE,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL UNIQUE,
        phonenumber TEXT NOT NULL UNIQUE,
        dateofbirth DATE NOT NULL
    )
"#;

/// Creates the `member` table if it does not exist yet
///
/// # Errors
///
/// Returns an error if the statement fails (e.g. missing privileges).
pub async fn ensure_member_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("Ensuring member table exists");

    sqlx::query(CREATE_MEMBER_TABLE).execute(pool).await?;

    info!("Member table ready");
    Ok(())
}

/// Creates the database if it doesn't exist
///
/// # Errors
///
/// Returns an error if:
/// - Cannot connect to PostgreSQL server
/// - Don't have permission to create databases
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    info!("Checking if database exists");

    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}

/// Removes every member row and resets the id sequence
///
/// Only meant for test databases.
pub async fn truncate_members(pool: &PgPool) -> Result<(), sqlx::Error> {
    warn!("Truncating member table");

    sqlx::query("TRUNCATE TABLE member RESTART IDENTITY")
        .execute(pool)
        .await?;

    Ok(())
}
