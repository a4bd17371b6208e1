//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health              - Liveness plus store clock
//!
//! # Content (read-only)
//! GET  /api/content             - Every collection plus site settings
//! GET  /api/featured-items      - Featured items, by title
//! GET  /api/order-items         - Order items, by title
//! GET  /api/gallery-images      - Gallery images, by id
//! GET  /api/testimonials        - Testimonials, by id
//! GET  /api/site-settings       - Site settings map
//!
//! # Admin
//! GET  /api/admin/content       - Same shape as /api/content
//! PUT  /api/admin/content       - Replace all collections, upsert settings
//!
//! # Orders
//! GET  /api/orders              - Orders, newest first
//! POST /api/orders              - Submit a pickup order (201)
//! GET  /api/orders/{orderId}    - One order with its line items
//!
//! # Contact
//! POST /api/contact-messages    - Submit a contact message (201)
//! ```

pub mod admin;
pub mod contact;
pub mod content;
pub mod health;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the read-only content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/api/content", get(content::snapshot))
        .route("/api/featured-items", get(content::featured_items))
        .route("/api/order-items", get(content::order_items))
        .route("/api/gallery-images", get(content::gallery_images))
        .route("/api/testimonials", get(content::testimonials))
        .route("/api/site-settings", get(content::site_settings))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/api/admin/content",
        get(admin::content).put(admin::replace_content),
    )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/{order_id}", get(orders::show))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/contact-messages", post(contact::create))
        .merge(content_routes())
        .merge(admin_routes())
        .merge(order_routes())
}
