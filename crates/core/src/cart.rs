//! Client cart state.
//!
//! A [`Cart`] maps item ids to quantities and is never mutated in place:
//! every operation returns a new snapshot. Rows and totals are derived
//! against the current [`Catalog`] on every call, so a price edit in the
//! admin panel shows up in the next total without touching the cart.
//!
//! # Invariant
//!
//! The map never holds a zero (or negative) quantity. Decrementing to zero
//! removes the entry, and persisted carts are filtered on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::order::OrderSubmission;
use crate::types::Price;

/// Namespace under which the cart is persisted on the client.
pub const CART_STORAGE_KEY: &str = "golden-crumb-cart-v1";

/// Item id to quantity. Every quantity is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<String, u32>,
}

/// A cart entry joined with its catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: String,
    pub title: String,
    pub price: Price,
    pub qty: u32,
    /// `price × qty`, unrounded.
    pub line_total: Price,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from its persisted JSON text.
    ///
    /// Best-effort: missing, unparsable, or non-object input yields an empty
    /// cart, and entries that are not positive integers are dropped.
    #[must_use]
    pub fn from_persisted(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };

        let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(raw)
        else {
            return Self::new();
        };

        let lines = map
            .into_iter()
            .filter_map(|(id, qty)| {
                let qty = u32::try_from(qty.as_u64()?).ok()?;
                (qty > 0).then_some((id, qty))
            })
            .collect();

        Self { lines }
    }

    /// Serialize for persistence.
    #[must_use]
    pub fn to_persisted(&self) -> String {
        serde_json::to_string(&self.lines).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Quantity of an item, zero when absent.
    #[must_use]
    pub fn quantity(&self, id: &str) -> u32 {
        self.lines.get(id).copied().unwrap_or(0)
    }

    /// One more of `id`.
    #[must_use]
    pub fn increment(&self, id: &str) -> Self {
        let mut next = self.clone();
        let qty = self.quantity(id).saturating_add(1);
        next.lines.insert(id.to_owned(), qty);
        next
    }

    /// One fewer of `id`; the entry disappears when it reaches zero.
    ///
    /// Decrementing an absent id returns an identical cart.
    #[must_use]
    pub fn decrement(&self, id: &str) -> Self {
        let mut next = self.clone();
        match self.quantity(id).saturating_sub(1) {
            0 => {
                next.lines.remove(id);
            }
            qty => {
                next.lines.insert(id.to_owned(), qty);
            }
        }
        next
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw entries in id order, including ids the catalog no longer knows.
    pub fn lines(&self) -> impl Iterator<Item = (&str, u32)> {
        self.lines.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Sum of quantities over entries still present in the catalog.
    #[must_use]
    pub fn total_items(&self, catalog: &Catalog) -> u32 {
        self.rows(catalog)
            .iter()
            .fold(0, |total, row| total.saturating_add(row.qty))
    }

    /// Entries joined with the catalog. Ids no longer in the catalog are
    /// silently skipped.
    #[must_use]
    pub fn rows(&self, catalog: &Catalog) -> Vec<CartRow> {
        self.lines
            .iter()
            .filter_map(|(id, &qty)| {
                let entry = catalog.find(id)?;
                Some(CartRow {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    price: entry.price,
                    qty,
                    line_total: entry.price.times(qty),
                })
            })
            .collect()
    }

    /// Sum of line totals, unrounded.
    #[must_use]
    pub fn total_price(&self, catalog: &Catalog) -> Price {
        self.rows(catalog).iter().map(|row| row.line_total).sum()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = BTreeMap::<String, u32>::deserialize(deserializer)?;
        Ok(Self {
            lines: lines.into_iter().filter(|(_, qty)| *qty > 0).collect(),
        })
    }
}

/// Client-side shop state: the cart plus the last accepted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopState {
    pub cart: Cart,
    pub last_order: Option<OrderSubmission>,
}

impl ShopState {
    /// State around an existing cart, with no order on display.
    #[must_use]
    pub const fn with_cart(cart: Cart) -> Self {
        Self {
            cart,
            last_order: None,
        }
    }

    /// Add one of `id`.
    #[must_use]
    pub fn increment(&self, id: &str) -> Self {
        Self {
            cart: self.cart.increment(id),
            last_order: self.last_order.clone(),
        }
    }

    /// Remove one of `id`.
    #[must_use]
    pub fn decrement(&self, id: &str) -> Self {
        Self {
            cart: self.cart.decrement(id),
            last_order: self.last_order.clone(),
        }
    }

    /// Empty the cart and forget the last order.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::default()
    }

    /// Keep an accepted order for display. The cart is left as it was.
    #[must_use]
    pub fn with_order(&self, order: OrderSubmission) -> Self {
        Self {
            cart: self.cart.clone(),
            last_order: Some(order),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{FeaturedItem, OrderItem};

    fn catalog() -> Catalog {
        Catalog::new(
            &[FeaturedItem {
                id: "croissant".to_owned(),
                title: "Honey Butter Croissant".to_owned(),
                price: "4.5".parse().unwrap(),
                image: String::new(),
            }],
            &[OrderItem {
                id: "macarons".to_owned(),
                title: "Rose Macaron Box".to_owned(),
                note: "Box of 8".to_owned(),
                price: "14".parse().unwrap(),
                image: String::new(),
            }],
        )
    }

    #[test]
    fn test_increment_from_absent() {
        let cart = Cart::new().increment("croissant").increment("croissant");
        assert_eq!(cart.quantity("croissant"), 2);
    }

    #[test]
    fn test_operations_return_new_snapshots() {
        let before = Cart::new().increment("croissant");
        let after = before.increment("croissant");
        assert_eq!(before.quantity("croissant"), 1);
        assert_eq!(after.quantity("croissant"), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_entry() {
        let cart = Cart::new().increment("tart").decrement("tart");
        assert!(cart.is_empty());
        assert_eq!(cart.lines().count(), 0);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let cart = Cart::new().increment("tart");
        assert_eq!(cart.decrement("baguette"), cart);
        assert_eq!(Cart::new().decrement("baguette"), Cart::new());
    }

    #[test]
    fn test_no_zero_entries_for_any_sequence() {
        // Walk every sequence of 8 increment/decrement steps on two ids.
        for mask in 0u32..(1 << 8) {
            let mut cart = Cart::new();
            for step in 0..8 {
                let id = if step % 3 == 0 { "a" } else { "b" };
                cart = if mask & (1 << step) == 0 {
                    cart.increment(id)
                } else {
                    cart.decrement(id)
                };
                assert!(cart.lines().all(|(_, qty)| qty > 0), "mask {mask:#b}");
            }
        }
    }

    #[test]
    fn test_rows_and_totals() {
        let cart = Cart::new()
            .increment("croissant")
            .increment("croissant")
            .increment("macarons");
        let catalog = catalog();

        let rows = cart.rows(&catalog);
        assert_eq!(rows.len(), 2);
        let croissant = rows.iter().find(|r| r.id == "croissant").unwrap();
        assert_eq!(croissant.line_total, Price::from_cents(900));

        assert_eq!(cart.total_items(&catalog), 3);
        assert_eq!(cart.total_price(&catalog), Price::from_cents(2300));
    }

    #[test]
    fn test_extreme_prices_and_quantities_do_not_panic() {
        let max = Price::from(rust_decimal::Decimal::MAX);
        let catalog = Catalog::new(
            &[],
            &[OrderItem {
                id: "cake".to_owned(),
                title: "Wedding Cake".to_owned(),
                note: String::new(),
                price: max,
                image: String::new(),
            }],
        );
        let cart = Cart::new().increment("cake").increment("cake");

        assert_eq!(cart.rows(&catalog).first().unwrap().line_total, max);
        assert_eq!(cart.total_price(&catalog), max);

        let stored = format!(r#"{{"croissant": {0}, "macarons": {0}}}"#, u32::MAX);
        let cart = Cart::from_persisted(Some(&stored));
        assert_eq!(cart.total_items(&self::catalog()), u32::MAX);
    }

    #[test]
    fn test_stale_ids_are_dropped_from_rows_and_totals() {
        let cart = Cart::new().increment("croissant").increment("discontinued");
        let catalog = catalog();

        assert_eq!(cart.rows(&catalog).len(), 1);
        assert_eq!(cart.total_items(&catalog), 1);
        assert_eq!(cart.total_price(&catalog), Price::from_cents(450));
    }

    #[test]
    fn test_total_follows_catalog_price_changes() {
        let cart = Cart::new().increment("croissant").increment("croissant");
        assert_eq!(cart.total_price(&catalog()), Price::from_cents(900));

        let repriced = Catalog::new(
            &[FeaturedItem {
                id: "croissant".to_owned(),
                title: "Honey Butter Croissant".to_owned(),
                price: Price::from_cents(500),
                image: String::new(),
            }],
            &[],
        );
        assert_eq!(cart.total_price(&repriced), Price::from_cents(1000));
    }

    #[test]
    fn test_from_persisted_is_best_effort() {
        assert!(Cart::from_persisted(None).is_empty());
        assert!(Cart::from_persisted(Some("not json")).is_empty());
        assert!(Cart::from_persisted(Some("[1,2]")).is_empty());
        assert!(Cart::from_persisted(Some("null")).is_empty());

        let cart = Cart::from_persisted(Some(r#"{"a":2,"b":0,"c":-1,"d":"x","e":1.5}"#));
        assert_eq!(cart.lines().collect::<Vec<_>>(), vec![("a", 2)]);
    }

    #[test]
    fn test_persisted_round_trip() {
        let cart = Cart::new().increment("a").increment("b").increment("b");
        let restored = Cart::from_persisted(Some(&cart.to_persisted()));
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_clear_discards_order() {
        let state = ShopState::with_cart(Cart::new().increment("a"));
        let cleared = state.clear();
        assert!(cleared.cart.is_empty());
        assert!(cleared.last_order.is_none());
    }
}
