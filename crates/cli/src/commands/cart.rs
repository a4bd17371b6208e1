//! Local cart commands.
//!
//! Mutations only touch the cart file. Pricing needs the live catalog, so
//! `show` fetches it from the API; entries for items no longer on the menu
//! are listed separately and count for nothing.

use std::fmt::Write as _;

use golden_crumb_core::cart::{Cart, ShopState};
use golden_crumb_core::catalog::Catalog;

use crate::api::ApiClient;
use crate::cart_store::CartStore;

fn update(
    store: &CartStore,
    change: impl FnOnce(&Cart) -> Cart,
) -> Result<Cart, Box<dyn std::error::Error>> {
    let cart = change(&store.load());
    store.save(&cart)?;
    tracing::debug!(path = %store.path().display(), "Cart saved");
    Ok(cart)
}

/// Add one of `id`.
///
/// # Errors
///
/// Returns an error if the cart file cannot be written.
pub fn add(store: &CartStore, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cart = update(store, |cart| cart.increment(id))?;
    #[allow(clippy::print_stdout)]
    {
        println!("{id}: {}", cart.quantity(id));
    }
    Ok(())
}

/// Remove one of `id`. Removing an item that is not in the cart does nothing.
///
/// # Errors
///
/// Returns an error if the cart file cannot be written.
pub fn remove(store: &CartStore, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cart = update(store, |cart| cart.decrement(id))?;
    #[allow(clippy::print_stdout)]
    {
        println!("{id}: {}", cart.quantity(id));
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart file cannot be written.
pub fn clear(store: &CartStore) -> Result<(), Box<dyn std::error::Error>> {
    update(store, |cart| ShopState::with_cart(cart.clone()).clear().cart)?;
    #[allow(clippy::print_stdout)]
    {
        println!("Cart cleared.");
    }
    Ok(())
}

/// Print the cart priced against the current catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn show(store: &CartStore, api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let cart = store.load();
    let catalog = api.content().await?.catalog();

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&cart, &catalog));
    }
    Ok(())
}

/// Render the cart as a plain-text table.
pub(crate) fn render(cart: &Cart, catalog: &Catalog) -> String {
    let rows = cart.rows(catalog);
    if rows.is_empty() {
        return "Your cart is empty.\n".to_owned();
    }

    let mut out = String::new();
    for row in &rows {
        let _ = writeln!(
            out,
            "{:<28} {:>3} x {:>8} = {:>9}",
            row.title,
            row.qty,
            row.price.to_string(),
            row.line_total.to_string()
        );
    }

    let unavailable: Vec<&str> = cart
        .lines()
        .filter(|(id, _)| catalog.find(id).is_none())
        .map(|(id, _)| id)
        .collect();
    if !unavailable.is_empty() {
        let _ = writeln!(out, "No longer available: {}", unavailable.join(", "));
    }

    let _ = writeln!(
        out,
        "{} items, subtotal {}",
        cart.total_items(catalog),
        cart.total_price(catalog)
    );
    out
}
