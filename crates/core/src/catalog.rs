//! Catalog rows, site copy, and the full content snapshot.
//!
//! These are the read-side shapes served by the storefront API. The admin
//! write-side schema lives in [`crate::admin`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{GalleryImageId, Price, TestimonialId};

/// A highlighted item on the featured menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedItem {
    pub id: String,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// An item offered in the online ordering section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub title: String,
    pub note: String,
    pub price: Price,
    pub image: String,
}

/// A gallery slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: GalleryImageId,
    pub src: String,
    pub alt: String,
}

/// A customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub text: String,
}

/// Free-text site copy keyed by setting name.
///
/// Every value is text, including ones that look numeric; the presentation
/// layer decodes them when it needs something else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteSettings(BTreeMap<String, String>);

impl SiteSettings {
    /// Create an empty settings map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SiteSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Everything the storefront renders, as served by `GET /api/content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub featured_items: Vec<FeaturedItem>,
    pub order_items: Vec<OrderItem>,
    pub gallery_images: Vec<GalleryImage>,
    pub testimonials: Vec<Testimonial>,
    pub site_settings: SiteSettings,
}

impl ContentSnapshot {
    /// The orderable catalog (featured items followed by order items).
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(&self.featured_items, &self.order_items)
    }
}

/// One orderable entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub price: Price,
}

/// The union of featured items and order items, looked up by id.
///
/// When an id appears in both lists, the featured entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build the catalog from both item lists.
    #[must_use]
    pub fn new(featured: &[FeaturedItem], order: &[OrderItem]) -> Self {
        let featured = featured.iter().map(|item| CatalogEntry {
            id: item.id.clone(),
            title: item.title.clone(),
            price: item.price,
        });
        let order = order.iter().map(|item| CatalogEntry {
            id: item.id.clone(),
            title: item.title.clone(),
            price: item.price,
        });

        Self {
            entries: featured.chain(order).collect(),
        }
    }

    /// Find an entry by item id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn featured(id: &str, cents: i64) -> FeaturedItem {
        FeaturedItem {
            id: id.to_owned(),
            title: format!("Featured {id}"),
            price: Price::from_cents(cents),
            image: String::new(),
        }
    }

    fn order(id: &str, cents: i64) -> OrderItem {
        OrderItem {
            id: id.to_owned(),
            title: format!("Order {id}"),
            note: String::new(),
            price: Price::from_cents(cents),
            image: String::new(),
        }
    }

    #[test]
    fn test_catalog_unions_both_lists() {
        let catalog = Catalog::new(&[featured("croissant", 450)], &[order("tart", 2800)]);
        assert!(catalog.find("croissant").is_some());
        assert_eq!(catalog.find("tart").unwrap().price, Price::from_cents(2800));
        assert!(catalog.find("baguette").is_none());
    }

    #[test]
    fn test_featured_entry_wins_on_duplicate_id() {
        let catalog = Catalog::new(&[featured("cake", 3600)], &[order("cake", 100)]);
        let entry = catalog.find("cake").unwrap();
        assert_eq!(entry.title, "Featured cake");
        assert_eq!(entry.price, Price::from_cents(3600));
    }

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let json = serde_json::to_value(ContentSnapshot::default()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "featuredItems",
                "galleryImages",
                "orderItems",
                "siteSettings",
                "testimonials"
            ]
        );
    }
}
