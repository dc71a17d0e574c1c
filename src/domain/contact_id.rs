//! ContactId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The caller-assigned numeric identifier of a contact.
///
/// This is the `id` field of a contact document, not the store's native
/// `_id` key. Uniqueness is not enforced anywhere: two documents may carry
/// the same `ContactId`, in which case lookups resolve to the first one in
/// insertion order.
///
/// # Example
///
/// ```
/// use contact_book::domain::ContactId;
///
/// let id: ContactId = "42".parse().unwrap();
/// assert_eq!(id.value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
    /// Wrap a raw integer ID.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying integer.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ContactId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ContactId {
    type Err = ValidationError;

    /// Parse an ID typed by a user or taken from a URL path segment.
    ///
    /// Surrounding whitespace is ignored; anything else that is not a base-10
    /// integer is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
