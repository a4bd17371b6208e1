//! Checkout validation and order payload building.
//!
//! Validation runs every check and reports all failures together, keyed by
//! field, so a form can show them at once. Only a clean form produces an
//! [`OrderSubmission`].

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, ShopState};
use crate::catalog::Catalog;
use crate::errors::FieldErrors;
use crate::order::{Customer, OrderLine, OrderSubmission, OrderTotals, iso_timestamp};
use crate::types::OrderNumber;

/// Optional `+`, then eight or more digits, spaces, parentheses, or hyphens.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9()\-\s]{8,}$").expect("Invalid regex"));

/// The pickup details a customer enters at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub pickup_time: String,
}

/// Whether a phone number passes the loose pickup-contact check.
///
/// Surrounding whitespace is ignored.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// Check the cart and the form together.
///
/// # Errors
///
/// Returns every violation, keyed by `cart`, `name`, `phone`, and
/// `pickupTime`.
pub fn validate(cart: &Cart, catalog: &Catalog, form: &CheckoutForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if cart.total_items(catalog) == 0 {
        errors.add("cart", "Add at least one item to checkout.");
    }
    if form.name.trim().is_empty() {
        errors.add("name", "Pickup name is required.");
    }
    if !is_valid_phone(&form.phone) {
        errors.add("phone", "Enter a valid phone number.");
    }
    if form.pickup_time.is_empty() {
        errors.add("pickupTime", "Pick a pickup time.");
    }

    errors.into_result(())
}

/// Build the order payload for the current cart.
///
/// Line totals and the subtotal are rounded to two decimals here; the
/// subtotal is rounded once from the unrounded sum.
#[must_use]
pub fn build_submission(
    cart: &Cart,
    catalog: &Catalog,
    form: &CheckoutForm,
    now: DateTime<Utc>,
) -> OrderSubmission {
    let rows = cart.rows(catalog);

    let items = rows
        .iter()
        .map(|row| OrderLine {
            id: row.id.clone(),
            title: row.title.clone(),
            qty: row.qty,
            unit_price: row.price,
            line_total: row.line_total.rounded(),
        })
        .collect();

    OrderSubmission {
        order_id: OrderNumber::generate(now),
        created_at: iso_timestamp(now),
        customer: Customer {
            name: form.name.trim().to_owned(),
            phone: form.phone.trim().to_owned(),
        },
        pickup_time: form.pickup_time.clone(),
        items,
        totals: OrderTotals {
            item_count: cart.total_items(catalog),
            subtotal: cart.total_price(catalog).rounded(),
        },
    }
}

/// Validate and build in one step.
///
/// # Errors
///
/// Returns the field errors from [`validate`]; nothing is built then.
pub fn checkout(
    state: &ShopState,
    catalog: &Catalog,
    form: &CheckoutForm,
    now: DateTime<Utc>,
) -> Result<OrderSubmission, FieldErrors> {
    validate(&state.cart, catalog, form)?;
    Ok(build_submission(&state.cart, catalog, form, now))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::OrderItem;
    use crate::types::Price;

    fn catalog() -> Catalog {
        Catalog::new(
            &[],
            &[
                OrderItem {
                    id: "a".to_owned(),
                    title: "Item A".to_owned(),
                    note: String::new(),
                    price: Price::from_cents(300),
                    image: String::new(),
                },
                OrderItem {
                    id: "third".to_owned(),
                    title: "Third".to_owned(),
                    note: String::new(),
                    price: "0.335".parse().unwrap(),
                    image: String::new(),
                },
            ],
        )
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "  Ada Baker ".to_owned(),
            phone: " +1 (555) 123-4567 ".to_owned(),
            pickup_time: "2026-10-20T09:30".to_owned(),
        }
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("55512345"));
        assert!(!is_valid_phone("555"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("++15551234567"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_validate_reports_everything_at_once() {
        let errors = validate(&Cart::new(), &catalog(), &CheckoutForm::default()).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["cart", "name", "phone", "pickupTime"]
        );
        assert_eq!(errors.get("cart"), Some("Add at least one item to checkout."));
    }

    #[test]
    fn test_empty_cart_is_rejected_with_cart_error() {
        let errors = validate(&Cart::new(), &catalog(), &form()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("cart"));
    }

    #[test]
    fn test_cart_of_stale_ids_counts_as_empty() {
        let cart = Cart::new().increment("gone");
        let errors = validate(&cart, &catalog(), &form()).unwrap_err();
        assert!(errors.contains("cart"));
    }

    #[test]
    fn test_short_phone_is_rejected() {
        let cart = Cart::new().increment("a");
        let mut form = form();
        form.phone = "555".to_owned();
        let errors = validate(&cart, &catalog(), &form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["phone"]);
    }

    #[test]
    fn test_build_submission_prices_lines() {
        let cart = Cart::new().increment("a").increment("a");
        let now = Utc::now();
        let order = build_submission(&cart, &catalog(), &form(), now);

        assert_eq!(order.order_id, OrderNumber::generate(now));
        assert_eq!(order.customer.name, "Ada Baker");
        assert_eq!(order.customer.phone, "+1 (555) 123-4567");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].unit_price, Price::from_cents(300));
        assert_eq!(order.items[0].line_total, Price::from_cents(600));
        assert_eq!(order.totals.item_count, 2);
        assert_eq!(order.totals.subtotal, Price::from_cents(600));
    }

    #[test]
    fn test_subtotal_rounds_the_unrounded_sum() {
        // 3 × 0.335 = 1.005 → line 1.01; subtotal 3.00 + 1.005 = 4.005 → 4.01
        let cart = Cart::new().increment("a").increment("third").increment("third").increment("third");
        let order = build_submission(&cart, &catalog(), &form(), Utc::now());

        let third = order.items.iter().find(|line| line.id == "third").unwrap();
        assert_eq!(third.line_total, Price::from_cents(101));
        assert_eq!(order.totals.subtotal, Price::from_cents(401));
    }

    #[test]
    fn test_checkout_leaves_state_untouched() {
        let state = ShopState::with_cart(Cart::new().increment("a"));
        let order = checkout(&state, &catalog(), &form(), Utc::now()).unwrap();
        assert_eq!(order.items.len(), 1);

        let shown = state.with_order(order.clone());
        assert_eq!(shown.cart, state.cart);
        assert_eq!(shown.last_order, Some(order));
    }
}
