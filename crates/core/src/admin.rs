//! Replace-all request schema for the admin content editor.
//!
//! Validation is structural only: the four collections must be arrays and
//! the settings must be an object. Row fields are all optional and are
//! written as given; a row the store cannot accept aborts the whole save.
//!
//! Price cells are read the way the editor's number inputs submit them:
//! blank and `null` mean zero, numbers and numeric strings are kept, and
//! anything else becomes a missing price that the store then refuses.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::{ContentSnapshot, SiteSettings};
use crate::types::Price;

/// Featured item row as edited in the admin table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedItemInput {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_price")]
    pub price: Option<Price>,
    pub image: Option<String>,
}

/// Order item row as edited in the admin table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItemInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub note: Option<String>,
    #[serde(deserialize_with = "lenient_price")]
    pub price: Option<Price>,
    pub image: Option<String>,
}

fn parse_amount(text: &str) -> Option<Price> {
    let text = text.trim();
    text.parse::<Price>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok().map(Price::from))
}

/// Coerce an edited price cell. `None` means the cell holds no number.
#[must_use]
pub fn coerce_price(value: &Value) -> Option<Price> {
    match value {
        Value::Null => Some(Price::ZERO),
        Value::Bool(true) => Some(Price::from_cents(100)),
        Value::Bool(false) => Some(Price::ZERO),
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) if s.trim().is_empty() => Some(Price::ZERO),
        Value::String(s) => parse_amount(s),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Price>, D::Error> {
    Value::deserialize(deserializer).map(|value| coerce_price(&value))
}

/// Gallery row. Any `id` sent by the editor is ignored; the store assigns
/// ids in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImageInput {
    pub src: Option<String>,
    pub alt: Option<String>,
}

/// Testimonial row. Ids are assigned by the store, as for gallery rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialInput {
    pub name: Option<String>,
    pub text: Option<String>,
}

/// Body of `PUT /api/admin/content`.
///
/// All five fields are required. The collections replace their tables
/// entirely; settings are upserted key by key and unlisted keys survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReplacement {
    pub featured_items: Vec<FeaturedItemInput>,
    pub order_items: Vec<OrderItemInput>,
    pub gallery_images: Vec<GalleryImageInput>,
    pub testimonials: Vec<TestimonialInput>,
    pub site_settings: BTreeMap<String, Value>,
}

/// Render any JSON value as setting text. Strings are kept verbatim;
/// everything else becomes its JSON text (`12`, `true`, `null`).
#[must_use]
pub fn setting_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ContentReplacement {
    /// Settings with every value normalized to text.
    #[must_use]
    pub fn settings_as_text(&self) -> SiteSettings {
        self.site_settings
            .iter()
            .map(|(key, value)| (key.clone(), setting_text(value)))
            .collect()
    }
}

impl From<&ContentSnapshot> for ContentReplacement {
    /// Start an edit from the current content, as the admin editor does
    /// after loading `GET /api/admin/content`.
    fn from(snapshot: &ContentSnapshot) -> Self {
        Self {
            featured_items: snapshot
                .featured_items
                .iter()
                .map(|item| FeaturedItemInput {
                    id: Some(item.id.clone()),
                    title: Some(item.title.clone()),
                    price: Some(item.price),
                    image: Some(item.image.clone()),
                })
                .collect(),
            order_items: snapshot
                .order_items
                .iter()
                .map(|item| OrderItemInput {
                    id: Some(item.id.clone()),
                    title: Some(item.title.clone()),
                    note: Some(item.note.clone()),
                    price: Some(item.price),
                    image: Some(item.image.clone()),
                })
                .collect(),
            gallery_images: snapshot
                .gallery_images
                .iter()
                .map(|image| GalleryImageInput {
                    src: Some(image.src.clone()),
                    alt: Some(image.alt.clone()),
                })
                .collect(),
            testimonials: snapshot
                .testimonials
                .iter()
                .map(|t| TestimonialInput {
                    name: Some(t.name.clone()),
                    text: Some(t.text.clone()),
                })
                .collect(),
            site_settings: snapshot
                .site_settings
                .iter()
                .map(|(k, v)| (k.to_owned(), Value::String(v.to_owned())))
                .collect(),
        }
    }
}

/// Response body of a successful `PUT /api/admin/content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceAck {
    pub ok: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body() -> Value {
        json!({
            "featuredItems": [{"id": "cake", "title": "Cake", "price": "36", "image": "x"}],
            "orderItems": [],
            "galleryImages": [{"id": 9, "src": "s", "alt": "a"}],
            "testimonials": [],
            "siteSettings": {"brandName": "X"}
        })
    }

    #[test]
    fn test_parses_complete_body() {
        let replacement: ContentReplacement = serde_json::from_value(body()).unwrap();
        assert_eq!(replacement.featured_items[0].price, Some(Price::from_cents(3600)));
        assert_eq!(replacement.gallery_images[0].src.as_deref(), Some("s"));
    }

    #[test]
    fn test_rejects_non_array_collection() {
        let mut value = body();
        value["featuredItems"] = json!({"id": "cake"});
        assert!(serde_json::from_value::<ContentReplacement>(value).is_err());
    }

    #[test]
    fn test_rejects_missing_collection() {
        let mut value = body();
        value.as_object_mut().unwrap().remove("testimonials");
        assert!(serde_json::from_value::<ContentReplacement>(value).is_err());
    }

    #[test]
    fn test_rejects_non_object_settings() {
        for settings in [json!(null), json!("brandName"), json!(["X"])] {
            let mut value = body();
            value["siteSettings"] = settings;
            assert!(serde_json::from_value::<ContentReplacement>(value).is_err());
        }
    }

    #[test]
    fn test_price_cells_are_coerced() {
        assert_eq!(coerce_price(&json!("")), Some(Price::ZERO));
        assert_eq!(coerce_price(&json!("  ")), Some(Price::ZERO));
        assert_eq!(coerce_price(&json!(null)), Some(Price::ZERO));
        assert_eq!(coerce_price(&json!(12)), Some(Price::from_cents(1200)));
        assert_eq!(coerce_price(&json!(4.5)), Some(Price::from_cents(450)));
        assert_eq!(coerce_price(&json!(" 6.00 ")), Some(Price::from_cents(600)));
        assert_eq!(coerce_price(&json!("1e3")), Some(Price::from_cents(100_000)));
        assert_eq!(coerce_price(&json!("abc")), None);
        assert_eq!(coerce_price(&json!([1])), None);
    }

    #[test]
    fn test_bad_price_does_not_fail_the_body() {
        let mut value = body();
        value["featuredItems"] = json!([
            {"id": "a", "title": "A", "price": "", "image": "x"},
            {"id": "b", "title": "B", "price": null, "image": "x"},
            {"id": "c", "title": "C", "price": "free", "image": "x"},
            {"id": "d", "title": "D", "image": "x"}
        ]);
        let replacement: ContentReplacement = serde_json::from_value(value).unwrap();
        let prices: Vec<_> = replacement.featured_items.iter().map(|row| row.price).collect();
        assert_eq!(prices, [Some(Price::ZERO), Some(Price::ZERO), None, None]);
    }

    #[test]
    fn test_rows_with_missing_fields_are_structurally_valid() {
        let mut value = body();
        value["featuredItems"] = json!([{"id": "untitled"}]);
        let replacement: ContentReplacement = serde_json::from_value(value).unwrap();
        assert!(replacement.featured_items[0].title.is_none());
    }

    #[test]
    fn test_settings_values_become_text() {
        let mut value = body();
        value["siteSettings"] = json!({"brandName": "X", "tables": 12, "open": true, "note": null});
        let replacement: ContentReplacement = serde_json::from_value(value).unwrap();
        let settings = replacement.settings_as_text();
        assert_eq!(settings.get("brandName"), Some("X"));
        assert_eq!(settings.get("tables"), Some("12"));
        assert_eq!(settings.get("open"), Some("true"));
        assert_eq!(settings.get("note"), Some("null"));
    }
}
