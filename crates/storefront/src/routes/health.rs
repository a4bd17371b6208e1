//! Health check route.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db;
use crate::error::Result;
use crate::state::AppState;

/// Health response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub ok: bool,
    /// Store clock, `YYYY-MM-DD HH:MM:SS` UTC.
    pub server_time: String,
}

/// Liveness check that also proves the store answers queries.
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>> {
    let server_time = db::server_time(state.pool()).await?;
    Ok(Json(Health {
        ok: true,
        server_time,
    }))
}
