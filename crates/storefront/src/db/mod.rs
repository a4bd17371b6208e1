//! Database operations for the storefront `SQLite` store.
//!
//! # Tables
//!
//! - `featured_items`, `order_items` - Catalog rows (text ids)
//! - `gallery_images`, `testimonials` - Content rows (store-assigned ids)
//! - `site_settings` - Free-text site copy (key/value)
//! - `orders`, `order_line_items` - Submitted pickup orders
//! - `contact_messages` - Contact form submissions
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`, embedded at
//! compile time, and run on server startup or via:
//! ```bash
//! cargo run -p golden-crumb-cli -- migrate
//! ```

pub mod contact;
pub mod content;
pub mod orders;
pub mod seed;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use contact::ContactRepository;
pub use content::ContentRepository;
pub use orders::OrderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Create a `SQLite` connection pool, creating the database file (and its
/// directory) if needed.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string, e.g. `sqlite://data/bakery.db`
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the file cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    if let Some(dir) = options.get_filename().parent()
        && !dir.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(dir).await?;
    }

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a single-connection in-memory pool.
///
/// Every connection to `sqlite::memory:` is its own database, so the pool is
/// pinned to one connection that never expires.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be opened.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Current store time as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the store cannot be reached.
pub async fn server_time(pool: &SqlitePool) -> Result<String, RepositoryError> {
    let (now,): (String,) = sqlx::query_as("SELECT datetime('now')")
        .fetch_one(pool)
        .await?;
    Ok(now)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = testing::empty_pool().await;
        migrate(&pool).await.unwrap();
        assert_eq!(testing::count(&pool, "orders").await, 0);
    }

    #[tokio::test]
    async fn test_create_pool_makes_parent_dir() {
        let dir = std::env::temp_dir().join(format!("gc-pool-{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/nested/bakery.db", dir.display());

        let pool = create_pool(&url).await.unwrap();
        migrate(&pool).await.unwrap();
        pool.close().await;

        assert!(dir.join("nested").join("bakery.db").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_server_time_format() {
        let pool = testing::empty_pool().await;
        let now = server_time(&pool).await.unwrap();
        assert_eq!(now.len(), "2026-10-19 12:00:00".len());
        assert_eq!(now.as_bytes().get(10), Some(&b' '));
    }
}
