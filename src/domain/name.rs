//! PersonName value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static STRICT_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("Failed to compile name regex"));

static RELAXED_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+( [A-Za-z]+)*$").expect("Failed to compile relaxed name regex")
});

/// A first or last name.
///
/// Backend rule: one or more ASCII letters, nothing else. The frontend edit
/// forms use [`PersonName::relaxed`], which also accepts single spaces
/// between words ("Mary Ann").
///
/// # Example
///
/// ```
/// use contact_book::domain::PersonName;
///
/// assert!(PersonName::new("John").is_ok());
/// assert!(PersonName::new("Mary Ann").is_err());
/// assert!(PersonName::relaxed("Mary Ann").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Create a name under the strict letters-only rule.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidName` for empty input or any
    /// non-letter character.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !STRICT_NAME_REGEX.is_match(&name) {
            return Err(ValidationError::InvalidName(name));
        }
        Ok(Self(name))
    }

    /// Create a name allowing single spaces between letter runs.
    pub fn relaxed(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !RELAXED_NAME_REGEX.is_match(&name) {
            return Err(ValidationError::InvalidName(name));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PersonName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Stored documents were written under the strict rule
impl<'de> Deserialize<'de> for PersonName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PersonName::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
