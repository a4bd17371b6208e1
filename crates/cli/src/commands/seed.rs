//! Seed the database with the default bakery content.
//!
//! Only empty tables are filled, so running this against a store the admin
//! editor has already changed is safe.

use tracing::info;

use golden_crumb_storefront::db;

use super::migrate;

/// Migrate, then seed every empty content table.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, migrated, or written.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = migrate::connect().await?;
    db::migrate(&pool).await?;

    let summary = db::seed::seed_defaults(&pool).await?;
    pool.close().await;

    #[allow(clippy::print_stdout)]
    {
        if summary.total() == 0 {
            println!("All content tables already have data; nothing seeded.");
        } else {
            println!("Seeded {} rows ({summary})", summary.total());
        }
    }

    info!("Seeding complete");
    Ok(())
}
