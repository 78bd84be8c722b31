//! Album Countdown Storage
//!
//! `SQLite` persistence for the countdown catalog, accounts, progress and
//! ratings.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table owns its own queries (`albums`,
//!   `accounts`, `progress`, `ratings`)
//! - **Single-statement writes**: the rating upsert and the progress advance
//!   are each one SQL statement, so racing requests cannot lose updates
//! - **Unique constraints as backstop**: duplicate accounts, progress rows and
//!   ratings surface as `CountdownError::Conflict`
//!
//! # Example
//!
//! ```rust,no_run
//! use countdown_storage::{create_pool, run_migrations, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://countdown.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteStore::new(pool);
//! let albums = countdown_core::catalog::list_all(&store).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod accounts;
pub mod albums;
pub mod progress;
pub mod ratings;

// Bulk load
pub mod catalog_import;

pub use context::SqliteStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://countdown.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}

/// Convert a stored Unix timestamp into UTC
pub(crate) fn timestamp(secs: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
