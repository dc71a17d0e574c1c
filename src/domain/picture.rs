//! PictureUrl value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// A contact picture, carried inline as a base64 data URL
/// (`data:image/png;base64,iVBORw0...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PictureUrl(String);

impl PictureUrl {
    /// Create a new PictureUrl.
    ///
    /// The media type must be `image/<subtype>` and the payload non-empty
    /// base64 text. The payload is not decoded.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        if !Self::is_valid(&url) {
            return Err(ValidationError::InvalidPictureUrl);
        }
        Ok(Self(url))
    }

    fn is_valid(url: &str) -> bool {
        let Some(rest) = url.strip_prefix(DATA_URL_PREFIX) else {
            return false;
        };
        let Some((subtype, payload)) = rest.split_once(BASE64_MARKER) else {
            return false;
        };

        let subtype_ok = !subtype.is_empty()
            && subtype
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        let payload_ok = !payload.is_empty()
            && payload
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='));

        subtype_ok && payload_ok
    }

    /// Get the data URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The image subtype, e.g. `png` or `svg+xml`.
    pub fn media_subtype(&self) -> &str {
        self.0
            .strip_prefix(DATA_URL_PREFIX)
            .and_then(|rest| rest.split_once(BASE64_MARKER))
            .map(|(subtype, _)| subtype)
            .unwrap_or_default()
    }

    /// Length of the encoded payload in bytes.
    pub fn payload_len(&self) -> usize {
        self.0
            .split_once(BASE64_MARKER)
            .map(|(_, payload)| payload.len())
            .unwrap_or(0)
    }
}

impl Serialize for PictureUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PictureUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PictureUrl::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PictureUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
