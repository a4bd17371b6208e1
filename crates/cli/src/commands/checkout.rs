//! Checkout command.
//!
//! Runs the same validation as the storefront form, then submits the order
//! payload. The cart is kept after a successful submission; `cart clear`
//! empties it explicitly.

use chrono::Utc;

use golden_crumb_core::FieldErrors;
use golden_crumb_core::cart::ShopState;
use golden_crumb_core::checkout::{self, CheckoutForm};

use crate::api::ApiClient;
use crate::cart_store::CartStore;

/// Checkout was refused before anything was sent.
#[derive(Debug, thiserror::Error)]
#[error("checkout has {} invalid field(s)", .0.len())]
pub struct CheckoutRejected(pub FieldErrors);

/// Format field errors one per line.
pub(crate) fn describe(errors: &FieldErrors) -> String {
    errors
        .fields()
        .filter_map(|field| errors.get(field).map(|message| format!("  {field}: {message}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate the cart and form, then submit the order.
///
/// # Errors
///
/// Returns [`CheckoutRejected`] on validation failure, or an API error if
/// the catalog cannot be fetched or the order is refused.
pub async fn run(
    store: &CartStore,
    api: &ApiClient,
    form: &CheckoutForm,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = ShopState::with_cart(store.load());
    let catalog = api.content().await?.catalog();

    let order = match checkout::checkout(&state, &catalog, form, Utc::now()) {
        Ok(order) => order,
        Err(errors) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Please fix the following:\n{}", describe(&errors));
            }
            return Err(CheckoutRejected(errors).into());
        }
    };

    let created = api.submit_order(&order).await?;
    let state = state.with_order(order);

    #[allow(clippy::print_stdout)]
    {
        println!("Order {} received.", created.order_id);
        if let Some(order) = &state.last_order {
            println!("{}", serde_json::to_string_pretty(order)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_each_field() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "Enter a valid phone number.");
        errors.add("cart", "Add at least one item to checkout.");

        assert_eq!(
            describe(&errors),
            "  cart: Add at least one item to checkout.\n  phone: Enter a valid phone number."
        );
        assert_eq!(
            CheckoutRejected(errors).to_string(),
            "checkout has 2 invalid field(s)"
        );
    }
}
