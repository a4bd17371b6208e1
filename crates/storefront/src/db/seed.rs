//! Default Golden Crumb content for a fresh store.
//!
//! Each table is seeded independently and only while it is empty, so an
//! admin who clears the gallery gets it back on the next start but edited
//! tables are never touched.

use core::fmt;

use serde_json::Value;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::instrument;

use golden_crumb_core::Price;
use golden_crumb_core::admin::{
    ContentReplacement, FeaturedItemInput, GalleryImageInput, OrderItemInput, TestimonialInput,
};

use super::RepositoryError;
use super::content::{ContentRow, upsert_settings};

const SITE_SETTINGS: [(&str, &str); 29] = [
    ("brandName", "Golden Crumb Bakery"),
    ("navMenu", "Menu"),
    ("navOrder", "Order"),
    ("navGallery", "Gallery"),
    ("navStory", "Our Story"),
    ("navContact", "Contact"),
    ("heroEyebrow", "Fresh every morning"),
    ("heroTitle", "Handcrafted bakes made with warmth and tradition."),
    (
        "heroSubtitle",
        "Artisan breads, elegant cakes, and small-batch pastries baked daily in the heart of your neighborhood.",
    ),
    ("heroPrimaryCta", "Order for Pickup"),
    ("heroSecondaryCta", "See Full Menu"),
    ("featuredEyebrow", "Featured Favorites"),
    ("featuredTitle", "Signature bakes customers love most"),
    ("orderEyebrow", "Online Ordering"),
    ("orderTitle", "Build your bakery box"),
    ("storyEyebrow", "Our Story"),
    ("storyTitle", "Family recipes, modern craft, and local ingredients."),
    (
        "storyBodyOne",
        "Golden Crumb began as a tiny kitchen project and grew into a full neighborhood bakery. Every recipe is made in-house using seasonal produce, cultured butter, and stone-milled flour.",
    ),
    (
        "storyBodyTwo",
        "From rustic loaves to celebration cakes, we bake with care so every bite feels comforting and memorable.",
    ),
    ("galleryEyebrow", "Gallery"),
    ("galleryTitle", "Inside the bakery"),
    ("testimonialsEyebrow", "Customer Notes"),
    ("testimonialsTitle", "What people say about Golden Crumb"),
    ("contactEyebrow", "Contact"),
    ("contactTitle", "Talk to our pastry team"),
    ("mapTitle", "Visit us this week"),
    ("mapAddress", "214 Maple Street, Portland, OR"),
    (
        "mapHours",
        "Mon-Sat: 7:00 AM - 7:00 PM | Sun: 8:00 AM - 4:00 PM",
    ),
    ("mapEmail", "hello@goldencrumb.com"),
];

fn unsplash(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&w={width}&q=80")
}

fn featured(id: &str, title: &str, cents: i64, photo: &str) -> FeaturedItemInput {
    FeaturedItemInput {
        id: Some(id.to_owned()),
        title: Some(title.to_owned()),
        price: Some(Price::from_cents(cents)),
        image: Some(unsplash(photo, 800)),
    }
}

fn orderable(id: &str, title: &str, note: &str, cents: i64, photo: &str) -> OrderItemInput {
    OrderItemInput {
        id: Some(id.to_owned()),
        title: Some(title.to_owned()),
        note: Some(note.to_owned()),
        price: Some(Price::from_cents(cents)),
        image: Some(unsplash(photo, 900)),
    }
}

fn gallery(photo: &str, alt: &str) -> GalleryImageInput {
    GalleryImageInput {
        src: Some(unsplash(photo, 1400)),
        alt: Some(alt.to_owned()),
    }
}

fn testimonial(name: &str, text: &str) -> TestimonialInput {
    TestimonialInput {
        name: Some(name.to_owned()),
        text: Some(text.to_owned()),
    }
}

/// The content a new store starts with.
#[must_use]
pub fn default_content() -> ContentReplacement {
    ContentReplacement {
        featured_items: vec![
            featured("croissant", "Honey Butter Croissant", 450, "1555507036-ab1f4038808a"),
            featured("cake", "Berry Velvet Cake", 3600, "1464349095431-e9a21285b5f3"),
            featured("sourdough", "Sourdough Loaf", 700, "1509440159596-0249088772ff"),
        ],
        order_items: vec![
            orderable(
                "macarons",
                "Rose Macaron Box",
                "Box of 8 assorted macarons",
                1400,
                "1569864358642-9d1684040f43",
            ),
            orderable(
                "cinnamon",
                "Cinnamon Swirl Buns",
                "Pack of 4 soft baked buns",
                1200,
                "1558961363-fa8fdf82db35",
            ),
            orderable(
                "tart",
                "Seasonal Fruit Tart",
                "Serves 6, fresh berries",
                2800,
                "1519915028121-7d3463d20b13",
            ),
            orderable(
                "baguette",
                "Classic Baguette",
                "Slow fermented, crusty finish",
                500,
                "1608198093002-ad4e005484ec",
            ),
        ],
        gallery_images: vec![
            gallery("1517686469429-8bdb88b9f907", "Fresh croissants on a tray"),
            gallery(
                "1623334044303-241021148842",
                "Bakery storefront with pastry display",
            ),
            gallery(
                "1590846406792-0adc7f938f1d",
                "Decorated cakes arranged for pickup",
            ),
        ],
        testimonials: vec![
            testimonial(
                "Maya R.",
                "The best almond croissant I have ever had. Flaky, buttery, and perfect with coffee.",
            ),
            testimonial(
                "Kevin T.",
                "We ordered a birthday cake and it looked beautiful and tasted even better.",
            ),
            testimonial(
                "Jules P.",
                "Their fresh sourdough has become a weekend tradition in our home.",
            ),
        ],
        site_settings: SITE_SETTINGS
            .iter()
            .map(|(key, value)| ((*key).to_owned(), Value::String((*value).to_owned())))
            .collect(),
    }
}

/// Rows inserted per table by [`seed_defaults`]. Zero means the table
/// already had content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub featured_items: usize,
    pub order_items: usize,
    pub gallery_images: usize,
    pub testimonials: usize,
    pub site_settings: usize,
}

impl SeedSummary {
    /// Total rows inserted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.featured_items
            + self.order_items
            + self.gallery_images
            + self.testimonials
            + self.site_settings
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "featured_items={} order_items={} gallery_images={} testimonials={} site_settings={}",
            self.featured_items,
            self.order_items,
            self.gallery_images,
            self.testimonials,
            self.site_settings
        )
    }
}

async fn is_empty(conn: &mut SqliteConnection, table: &str) -> Result<bool, RepositoryError> {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut *conn)
        .await?;
    Ok(n == 0)
}

async fn seed_rows<R: ContentRow>(
    conn: &mut SqliteConnection,
    rows: &[R],
) -> Result<usize, RepositoryError> {
    if !is_empty(conn, R::TABLE).await? {
        return Ok(0);
    }
    for row in rows {
        row.bind(sqlx::query(R::INSERT)).execute(&mut *conn).await?;
    }
    Ok(rows.len())
}

/// Fill every empty content table with the default Golden Crumb content.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
#[instrument(skip(pool))]
pub async fn seed_defaults(pool: &SqlitePool) -> Result<SeedSummary, RepositoryError> {
    let content = default_content();
    let mut conn = pool.acquire().await?;

    let mut summary = SeedSummary {
        featured_items: seed_rows(&mut conn, &content.featured_items).await?,
        order_items: seed_rows(&mut conn, &content.order_items).await?,
        gallery_images: seed_rows(&mut conn, &content.gallery_images).await?,
        testimonials: seed_rows(&mut conn, &content.testimonials).await?,
        site_settings: 0,
    };

    if is_empty(&mut conn, "site_settings").await? {
        let settings = content.settings_as_text();
        upsert_settings(&mut conn, &settings).await?;
        summary.site_settings = settings.len();
    }

    tracing::info!(%summary, "Seeded default content");
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::ContentRepository;
    use crate::db::testing::{count, empty_pool};

    #[tokio::test]
    async fn test_seed_fills_empty_store() {
        let pool = empty_pool().await;
        let summary = seed_defaults(&pool).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                featured_items: 3,
                order_items: 4,
                gallery_images: 3,
                testimonials: 3,
                site_settings: 29,
            }
        );

        let settings = ContentRepository::new(&pool).site_settings().await.unwrap();
        assert_eq!(settings.get("mapAddress"), Some("214 Maple Street, Portland, OR"));
    }

    #[tokio::test]
    async fn test_seed_twice_inserts_nothing() {
        let pool = empty_pool().await;
        seed_defaults(&pool).await.unwrap();
        let second = seed_defaults(&pool).await.unwrap();

        assert_eq!(second.total(), 0);
        assert_eq!(count(&pool, "featured_items").await, 3);
    }

    #[tokio::test]
    async fn test_seed_only_refills_empty_tables() {
        let pool = empty_pool().await;
        seed_defaults(&pool).await.unwrap();
        sqlx::query("DELETE FROM gallery_images")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("DELETE FROM featured_items WHERE id = 'cake'")
            .execute(&pool)
            .await
            .unwrap();

        let summary = seed_defaults(&pool).await.unwrap();
        assert_eq!(summary.gallery_images, 3);
        assert_eq!(summary.featured_items, 0);
        assert_eq!(count(&pool, "featured_items").await, 2);
    }

    #[test]
    fn test_default_prices() {
        let content = default_content();
        let croissant = &content.featured_items[0];
        assert_eq!(croissant.price, Some("4.5".parse().unwrap()));
        assert_eq!(content.order_items.len(), 4);
    }
}
