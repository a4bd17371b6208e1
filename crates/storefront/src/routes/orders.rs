//! Order routes.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use golden_crumb_core::order::{CreateOrderRequest, Order, OrderCreated, OrderDetail};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// All orders, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().list().await?))
}

/// One order with its line items.
pub async fn show(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDetail>> {
    state
        .orders()
        .find(&order_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Order {order_id}")))
}

/// Accept a pickup order.
///
/// Line totals and the subtotal are stored as submitted.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreated>)> {
    let Json(request) =
        payload.map_err(|rejection| AppError::from_json_rejection("order", &rejection))?;

    let order = request
        .validate(Utc::now())
        .map_err(|rejection| AppError::invalid("order", rejection))?;

    state
        .orders()
        .create(&order)
        .await
        .map_err(|e| AppError::persistence("Failed to create order", e))?;

    tracing::info!(order_id = %order.order_number, "Order created");

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            ok: true,
            order_id: order.order_number,
        }),
    ))
}
