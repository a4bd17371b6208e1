//! Read-only content routes.

use axum::{Json, extract::State};
use tracing::instrument;

use golden_crumb_core::catalog::{
    ContentSnapshot, FeaturedItem, GalleryImage, OrderItem, SiteSettings, Testimonial,
};

use crate::error::Result;
use crate::state::AppState;

/// Everything the storefront renders in one response.
#[instrument(skip(state))]
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<ContentSnapshot>> {
    Ok(Json(state.content().snapshot().await?))
}

pub async fn featured_items(State(state): State<AppState>) -> Result<Json<Vec<FeaturedItem>>> {
    Ok(Json(state.content().featured_items().await?))
}

pub async fn order_items(State(state): State<AppState>) -> Result<Json<Vec<OrderItem>>> {
    Ok(Json(state.content().order_items().await?))
}

pub async fn gallery_images(State(state): State<AppState>) -> Result<Json<Vec<GalleryImage>>> {
    Ok(Json(state.content().gallery_images().await?))
}

pub async fn testimonials(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(state.content().testimonials().await?))
}

pub async fn site_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(state.content().site_settings().await?))
}
