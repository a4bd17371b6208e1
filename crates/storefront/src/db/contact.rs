//! Contact message repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use golden_crumb_core::ContactMessageId;
use golden_crumb_core::contact::NewContactMessage;
use golden_crumb_core::order::iso_timestamp;

use super::RepositoryError;

/// Repository for contact form submissions.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a validated message with its receive time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, message), fields(email_domain = %message.email.domain()))]
    pub async fn create(
        &self,
        message: &NewContactMessage,
        received_at: DateTime<Utc>,
    ) -> Result<ContactMessageId, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO contact_messages (name, email, message, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&message.name)
        .bind(message.email.as_str())
        .bind(&message.message)
        .bind(iso_timestamp(received_at))
        .fetch_one(self.pool)
        .await?;

        Ok(ContactMessageId::new(id))
    }
}
