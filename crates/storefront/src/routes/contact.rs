//! Contact form route.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use golden_crumb_core::contact::ContactForm;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response body of a stored contact message.
#[derive(Debug, Serialize)]
pub struct MessageReceived {
    pub ok: bool,
}

/// Validate and store a contact message.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageReceived>)> {
    let Json(form) =
        payload.map_err(|rejection| AppError::from_json_rejection("contact", &rejection))?;

    let message = form.validate().map_err(|fields| AppError::Validation {
        what: "contact",
        fields,
    })?;

    let id = state
        .contact_messages()
        .create(&message, Utc::now())
        .await
        .map_err(|e| AppError::persistence("Failed to save message", e))?;

    tracing::info!(message_id = %id, "Contact message stored");

    Ok((StatusCode::CREATED, Json(MessageReceived { ok: true })))
}
