//! Client-generated order numbers.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The public identifier of an order, e.g. `GC-1767225600000`.
///
/// Generated by the client from the wall clock, so two submissions within
/// the same millisecond collide. The store's unique constraint is the only
/// guard; a collision surfaces as a failed write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Prefix of every generated order number.
    pub const PREFIX: &'static str = "GC-";

    /// Generate an order number from a timestamp.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("{}{}", Self::PREFIX, now.timestamp_millis()))
    }

    /// Wrap an existing order number without validation.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_generate_uses_epoch_millis() {
        let now = Utc.timestamp_millis_opt(1_767_225_600_123).single();
        let number = OrderNumber::generate(now.unwrap_or_default());
        assert_eq!(number.as_str(), "GC-1767225600123");
    }

    #[test]
    fn test_same_millisecond_collides() {
        let now = Utc::now();
        assert_eq!(OrderNumber::generate(now), OrderNumber::generate(now));
    }
}
