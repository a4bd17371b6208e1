//! Contact form validation.

use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;
use crate::types::Email;

/// Shortest accepted message, counted in characters after trimming.
pub const MIN_MESSAGE_CHARS: usize = 12;

/// Contact form as submitted. Missing fields deserialize as empty strings
/// and are then reported by [`ContactForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A validated, trimmed contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Validate every field and return the trimmed message.
    ///
    /// # Errors
    ///
    /// Returns all violations keyed by `name`, `email`, and `message`.
    pub fn validate(&self) -> Result<NewContactMessage, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required.");
        }

        let email = Email::parse(self.email.trim());
        if email.is_err() {
            errors.add("email", "Enter a valid email address.");
        }

        let message = self.message.trim();
        if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.add(
                "message",
                format!("Message should be at least {MIN_MESSAGE_CHARS} characters."),
            );
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(NewContactMessage {
                name: name.to_owned(),
                email,
                message: message.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}
