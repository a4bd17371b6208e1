//! Order payload schemas shared by the client and the server.
//!
//! The client builds a strict [`OrderSubmission`]. The server reads the same
//! JSON through the lenient [`CreateOrderRequest`] so it can tell a missing
//! field apart from a malformed body, then turns it into a [`NewOrder`].
//!
//! Line totals and the subtotal are computed by the client and stored as
//! sent. The server does not recompute or bound-check them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrderNumber, OrderRowId, Price};

/// Format a timestamp the way order records store it
/// (RFC 3339, millisecond precision, `Z` suffix).
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Pickup contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

/// One priced line of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    pub title: String,
    pub qty: u32,
    pub unit_price: Price,
    /// `qty × unit_price`, rounded to two decimals.
    pub line_total: Price,
}

/// Order totals as computed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub item_count: u32,
    /// Sum of unrounded line totals, rounded to two decimals.
    pub subtotal: Price,
}

/// The payload the client sends to `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub order_id: OrderNumber,
    pub created_at: String,
    pub customer: Customer,
    pub pickup_time: String,
    pub items: Vec<OrderLine>,
    pub totals: OrderTotals,
}

/// Server-side view of an order body. Every field is optional so that
/// presence can be checked explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    pub order_id: Option<String>,
    pub customer: Option<CustomerInput>,
    pub pickup_time: Option<String>,
    pub items: Option<Vec<OrderLineInput>>,
    pub totals: Option<TotalsInput>,
    pub created_at: Option<String>,
}

/// Customer block of a [`CreateOrderRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerInput {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Totals block of a [`CreateOrderRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TotalsInput {
    pub item_count: Option<i64>,
    pub subtotal: Option<Price>,
}

/// A line item exactly as submitted. Fields are stored as-is; a missing
/// one fails at the store's NOT NULL constraint and aborts the whole order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderLineInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub qty: Option<i64>,
    pub unit_price: Option<Price>,
    pub line_total: Option<Price>,
}

/// Why an order body was refused before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRejection {
    /// A required field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The order has no line items.
    #[error("order must contain at least one item")]
    NoItems,
}

/// A structurally valid order, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_time: String,
    pub item_count: i64,
    pub subtotal: Price,
    pub created_at: String,
    pub items: Vec<OrderLineInput>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, OrderRejection> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(OrderRejection::MissingField(field))
}

impl CreateOrderRequest {
    /// Check presence of the required fields.
    ///
    /// `createdAt` defaults to `now`; totals default to zero.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRejection`] if the order id, customer name or phone,
    /// or pickup time is missing, or if there are no items.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewOrder, OrderRejection> {
        let order_number = required(self.order_id, "orderId")?;
        let customer = self.customer.unwrap_or_default();
        let customer_name = required(customer.name, "customer.name")?;
        let customer_phone = required(customer.phone, "customer.phone")?;
        let pickup_time = required(self.pickup_time, "pickupTime")?;

        let items = self.items.unwrap_or_default();
        if items.is_empty() {
            return Err(OrderRejection::NoItems);
        }

        let totals = self.totals.unwrap_or_default();

        Ok(NewOrder {
            order_number: OrderNumber::new(order_number),
            customer_name,
            customer_phone,
            pickup_time,
            item_count: totals.item_count.unwrap_or(0),
            subtotal: totals.subtotal.unwrap_or(Price::ZERO),
            created_at: self
                .created_at
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| iso_timestamp(now)),
            items,
        })
    }
}

/// Response body of a successful `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub ok: bool,
    pub order_id: OrderNumber,
}

/// A stored order as listed by `GET /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderRowId,
    pub order_id: OrderNumber,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_time: String,
    pub item_count: i64,
    pub subtotal: Price,
    pub created_at: String,
}

/// A stored line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRecord {
    pub item_id: String,
    pub title: String,
    pub qty: i64,
    pub unit_price: Price,
    pub line_total: Price,
}

/// An order together with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLineRecord>,
}
