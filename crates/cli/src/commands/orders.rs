//! Order listing command.

use std::fmt::Write as _;

use golden_crumb_core::order::Order;

use crate::api::ApiClient;

/// Print all orders, newest first.
///
/// # Errors
///
/// Returns an API error if the list cannot be fetched.
pub async fn run(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let orders = api.orders().await?;
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&orders));
    }
    Ok(())
}

fn render(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.\n".to_owned();
    }

    let mut out = String::new();
    for order in orders {
        let _ = writeln!(
            out,
            "{:<18} {:<20} {:<18} {:>3} items {:>9}  pickup {}",
            order.order_id.as_str(),
            order.customer_name,
            order.customer_phone,
            order.item_count,
            order.subtotal.to_string(),
            order.pickup_time
        );
    }
    out
}
