//! Admin content editor routes.
//!
//! There is no authentication in front of these routes; deployments are
//! expected to restrict `/api/admin` at the proxy.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::instrument;

use golden_crumb_core::admin::{ContentReplacement, ReplaceAck};
use golden_crumb_core::catalog::ContentSnapshot;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Current content, in the shape the editor loads and saves.
pub async fn content(State(state): State<AppState>) -> Result<Json<ContentSnapshot>> {
    Ok(Json(state.content().snapshot().await?))
}

/// Replace every collection and upsert the settings.
///
/// A body of the wrong shape is refused before any write; a row the store
/// rejects rolls the whole save back.
#[instrument(skip(state, payload))]
pub async fn replace_content(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContentReplacement>, JsonRejection>,
) -> Result<Json<ReplaceAck>> {
    let Json(replacement) =
        payload.map_err(|rejection| AppError::from_json_rejection("admin", &rejection))?;

    state
        .content()
        .replace_all(&replacement)
        .await
        .map_err(|e| AppError::persistence("Failed to update content", e))?;

    Ok(Json(ReplaceAck { ok: true }))
}
