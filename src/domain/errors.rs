//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided contact ID is not an integer.
    InvalidId(String),

    /// The provided name contains something other than letters, or is empty.
    InvalidName(String),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is not exactly ten digits.
    InvalidPhone(String),

    /// The provided picture is not a data-URL encoded image.
    InvalidPictureUrl,

    /// The field name does not belong to a contact.
    UnknownField(String),

    /// The field exists but cannot be written through a property update.
    ProtectedField(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "Invalid contact ID: {}", id),
            Self::InvalidName(name) => write!(f, "Invalid name: {:?}", name),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::InvalidPictureUrl => write!(f, "Invalid picture URL"),
            Self::UnknownField(name) => write!(f, "Unknown contact property: {}", name),
            Self::ProtectedField(name) => write!(f, "Contact property {} cannot be updated", name),
        }
    }
}

impl std::error::Error for ValidationError {}
