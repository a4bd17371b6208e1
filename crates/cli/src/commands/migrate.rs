//! Database migration command.
//!
//! Uses the same `BAKERY_DATABASE_URL` (fallback `DATABASE_URL`) as the
//! server. Migrations live in `crates/storefront/migrations/`.

use sqlx::SqlitePool;
use tracing::info;

use golden_crumb_storefront::{StorefrontConfig, db};

/// Connect to the configured database and apply pending migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database cannot be
/// opened or migrated.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    info!("Running migrations...");
    db::migrate(&pool).await?;
    info!("Migrations complete!");

    pool.close().await;
    Ok(())
}

/// Open the configured database.
pub(crate) async fn connect() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    info!(database_url = %config.database_url, "Connecting to database...");
    Ok(db::create_pool(&config.database_url).await?)
}
