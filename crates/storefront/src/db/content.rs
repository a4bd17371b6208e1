//! Content repository: catalog, gallery, testimonials, and site settings.
//!
//! Reads are sorted the way the storefront renders them (items by title,
//! gallery and testimonials by id). Writes only happen through
//! [`ContentRepository::replace_all`], which swaps every collection inside
//! one transaction.

use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::instrument;

use golden_crumb_core::admin::{
    ContentReplacement, FeaturedItemInput, GalleryImageInput, OrderItemInput, TestimonialInput,
};
use golden_crumb_core::catalog::{
    ContentSnapshot, FeaturedItem, GalleryImage, OrderItem, SiteSettings, Testimonial,
};
use golden_crumb_core::{GalleryImageId, Price, TestimonialId};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct FeaturedItemRow {
    id: String,
    title: String,
    price: Price,
    image: String,
}

impl From<FeaturedItemRow> for FeaturedItem {
    fn from(row: FeaturedItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            price: row.price,
            image: row.image,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    title: String,
    note: String,
    price: Price,
    image: String,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            note: row.note,
            price: row.price,
            image: row.image,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GalleryImageRow {
    id: GalleryImageId,
    src: String,
    alt: String,
}

impl From<GalleryImageRow> for GalleryImage {
    fn from(row: GalleryImageRow) -> Self {
        Self {
            id: row.id,
            src: row.src,
            alt: row.alt,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TestimonialRow {
    id: TestimonialId,
    name: String,
    text: String,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            text: row.text,
        }
    }
}

/// A row that can be written into one of the replaceable content tables.
///
/// Fields are bound exactly as submitted. A `None` binds `NULL`, which the
/// table's NOT NULL constraints reject.
pub trait ContentRow {
    /// Table the row belongs to.
    const TABLE: &'static str;

    /// Parameterized insert statement for one row.
    const INSERT: &'static str;

    /// Bind this row's values onto [`Self::INSERT`].
    fn bind<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>>;
}

impl ContentRow for FeaturedItemInput {
    const TABLE: &'static str = "featured_items";
    const INSERT: &'static str =
        "INSERT INTO featured_items (id, title, price, image) VALUES (?, ?, ?, ?)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(self.id.as_deref())
            .bind(self.title.as_deref())
            .bind(self.price)
            .bind(self.image.as_deref())
    }
}

impl ContentRow for OrderItemInput {
    const TABLE: &'static str = "order_items";
    const INSERT: &'static str =
        "INSERT INTO order_items (id, title, note, price, image) VALUES (?, ?, ?, ?, ?)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(self.id.as_deref())
            .bind(self.title.as_deref())
            .bind(self.note.as_deref())
            .bind(self.price)
            .bind(self.image.as_deref())
    }
}

impl ContentRow for GalleryImageInput {
    const TABLE: &'static str = "gallery_images";
    const INSERT: &'static str = "INSERT INTO gallery_images (src, alt) VALUES (?, ?)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query.bind(self.src.as_deref()).bind(self.alt.as_deref())
    }
}

impl ContentRow for TestimonialInput {
    const TABLE: &'static str = "testimonials";
    const INSERT: &'static str = "INSERT INTO testimonials (name, text) VALUES (?, ?)";

    fn bind<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query.bind(self.name.as_deref()).bind(self.text.as_deref())
    }
}

/// Delete every row of `R::TABLE`, then insert `rows` in order.
pub(crate) async fn replace_rows<R: ContentRow>(
    conn: &mut SqliteConnection,
    rows: &[R],
) -> Result<(), RepositoryError> {
    sqlx::query(&format!("DELETE FROM {}", R::TABLE))
        .execute(&mut *conn)
        .await?;

    for row in rows {
        row.bind(sqlx::query(R::INSERT)).execute(&mut *conn).await?;
    }

    Ok(())
}

/// Insert or overwrite each setting. Keys not listed are left alone.
pub(crate) async fn upsert_settings(
    conn: &mut SqliteConnection,
    settings: &SiteSettings,
) -> Result<(), RepositoryError> {
    for (key, value) in settings.iter() {
        sqlx::query(
            "INSERT INTO site_settings (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn apply_replacement(
    conn: &mut SqliteConnection,
    replacement: &ContentReplacement,
) -> Result<(), RepositoryError> {
    replace_rows(conn, &replacement.featured_items).await?;
    replace_rows(conn, &replacement.order_items).await?;
    replace_rows(conn, &replacement.gallery_images).await?;
    replace_rows(conn, &replacement.testimonials).await?;
    upsert_settings(conn, &replacement.settings_as_text()).await
}

/// Repository for storefront content.
pub struct ContentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Featured items, alphabetically by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured_items(&self) -> Result<Vec<FeaturedItem>, RepositoryError> {
        let rows: Vec<FeaturedItemRow> = sqlx::query_as(
            "SELECT id, title, price, image FROM featured_items ORDER BY title ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Order items, alphabetically by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn order_items(&self) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT id, title, note, price, image FROM order_items ORDER BY title ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Gallery images by ascending id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn gallery_images(&self) -> Result<Vec<GalleryImage>, RepositoryError> {
        let rows: Vec<GalleryImageRow> =
            sqlx::query_as("SELECT id, src, alt FROM gallery_images ORDER BY id ASC")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Testimonials by ascending id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows: Vec<TestimonialRow> =
            sqlx::query_as("SELECT id, name, text FROM testimonials ORDER BY id ASC")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All site settings as a key/value map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn site_settings(&self) -> Result<SiteSettings, RepositoryError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM site_settings")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Every collection plus the settings, read concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first `RepositoryError` any of the reads produces.
    pub async fn snapshot(&self) -> Result<ContentSnapshot, RepositoryError> {
        let (featured_items, order_items, gallery_images, testimonials, site_settings) = tokio::try_join!(
            self.featured_items(),
            self.order_items(),
            self.gallery_images(),
            self.testimonials(),
            self.site_settings(),
        )?;

        Ok(ContentSnapshot {
            featured_items,
            order_items,
            gallery_images,
            testimonials,
            site_settings,
        })
    }

    /// Replace all four collections and upsert the settings atomically.
    ///
    /// Collections are cleared and re-inserted in submission order; settings
    /// keys not present in `replacement` keep their stored value. Any failed
    /// statement rolls back the whole replacement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails, including
    /// NOT NULL or primary key violations from the submitted rows.
    #[instrument(
        skip(self, replacement),
        fields(
            featured = replacement.featured_items.len(),
            order = replacement.order_items.len(),
            gallery = replacement.gallery_images.len(),
            testimonials = replacement.testimonials.len(),
            settings = replacement.site_settings.len(),
        )
    )]
    pub async fn replace_all(&self, replacement: &ContentReplacement) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        match apply_replacement(&mut tx, replacement).await {
            Ok(()) => {
                tx.commit().await?;
                tracing::info!("Content replaced");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}
