//! The bounded set of contact properties writable by a single-property update.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire names that exist on a stored contact but must never be overwritten.
const PROTECTED_FIELDS: &[&str] = &["id", "_id"];

/// A contact property that may be changed through
/// `PUT /contact/:id?property_name=...`.
///
/// Parsing is exact and case-sensitive on the wire name (`FirstName`, not
/// `firstname`). `id` and `_id` are rejected as protected rather than unknown
/// so callers can report the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    PictureUrl,
}

impl ContactField {
    /// Every updatable field, in display order.
    pub const ALL: [ContactField; 5] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Phone,
        ContactField::PictureUrl,
    ];

    /// The JSON key this field is stored under.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "FirstName",
            Self::LastName => "LastName",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::PictureUrl => "PictureUrl",
        }
    }

    /// Whether a contact must carry this field.
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::PictureUrl)
    }
}

impl FromStr for ContactField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(field) = Self::ALL.iter().copied().find(|f| f.as_str() == s) {
            return Ok(field);
        }
        if PROTECTED_FIELDS.contains(&s) {
            return Err(ValidationError::ProtectedField(s.to_string()));
        }
        Err(ValidationError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContactField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContactField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
