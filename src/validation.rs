//! Field-level validation of contact payloads.
//!
//! Every field is checked and every failure is reported, so a client sees all
//! problems with a submission at once. Values are never trimmed or re-cased:
//! what validates is stored byte for byte.

use crate::domain::{
    ContactField, ContactId, EmailAddress, PersonName, PhoneNumber, PictureUrl, ValidationError,
};
use crate::models::{Contact, ContactFieldUpdate, ContactPayload};
use serde::Serialize;
use std::fmt;

/// Which name rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameRule {
    /// Letters only. Used by the backend.
    #[default]
    Strict,
    /// Letters with single inner spaces. Used by the edit forms.
    Relaxed,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField) -> Self {
        Self {
            field,
            message: message_for(field).to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// All field errors from one validation pass. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn single(field: ContactField) -> Self {
        Self(vec![FieldError::new(field)])
    }

    /// The individual field errors, in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Messages for display or an error body.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    /// Whether a particular field was rejected.
    pub fn has_field(&self, field: ContactField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// The client-facing message for a rejected field.
pub fn message_for(field: ContactField) -> &'static str {
    match field {
        ContactField::FirstName => {
            "FirstName must contain only alphabets and it should not be empty"
        }
        ContactField::LastName => {
            "LastName must contain only alphabets and it should not be empty"
        }
        ContactField::Email => "Email must be a valid email address and it should not be empty",
        ContactField::Phone => "Phone must be a string of 10 digits",
        ContactField::PictureUrl => "PictureUrl must be a data URL encoded image",
    }
}

fn name(value: &str, rule: NameRule) -> Result<PersonName, ValidationError> {
    match rule {
        NameRule::Strict => PersonName::new(value),
        NameRule::Relaxed => PersonName::relaxed(value),
    }
}

/// Validate a full payload into a storable [`Contact`].
pub fn validate_contact(
    payload: &ContactPayload,
    rule: NameRule,
) -> Result<Contact, ValidationErrors> {
    let mut errors = Vec::new();

    let first_name = name(&payload.first_name, rule)
        .map_err(|_| errors.push(FieldError::new(ContactField::FirstName)))
        .ok();
    let last_name = name(&payload.last_name, rule)
        .map_err(|_| errors.push(FieldError::new(ContactField::LastName)))
        .ok();
    let email = EmailAddress::new(payload.email.as_str())
        .map_err(|_| errors.push(FieldError::new(ContactField::Email)))
        .ok();
    let phone = PhoneNumber::new(payload.phone.as_str())
        .map_err(|_| errors.push(FieldError::new(ContactField::Phone)))
        .ok();
    let picture_url = match payload.picture_url.as_deref() {
        None | Some("") => Some(None),
        Some(url) => PictureUrl::new(url)
            .map(Some)
            .map_err(|_| errors.push(FieldError::new(ContactField::PictureUrl)))
            .ok(),
    };

    match (first_name, last_name, email, phone, picture_url) {
        (Some(first_name), Some(last_name), Some(email), Some(phone), Some(picture_url))
            if errors.is_empty() =>
        {
            Ok(Contact {
                document_id: None,
                id: payload.id.map(ContactId::new),
                first_name,
                last_name,
                email,
                phone,
                picture_url,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Validate one property value against its field's rule.
pub fn validate_field(
    field: ContactField,
    value: &str,
    rule: NameRule,
) -> Result<ContactFieldUpdate, ValidationErrors> {
    let valid = match field {
        ContactField::FirstName | ContactField::LastName => name(value, rule).is_ok(),
        ContactField::Email => EmailAddress::new(value).is_ok(),
        ContactField::Phone => PhoneNumber::new(value).is_ok(),
        ContactField::PictureUrl => PictureUrl::new(value).is_ok(),
    };

    if !valid {
        return Err(ValidationErrors::single(field));
    }

    Ok(ContactFieldUpdate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> ContactPayload {
        ContactPayload::new("John", "Doe", "john@doe.com", "1234567890")
    }

    #[test]
    fn test_valid_contact_round_trips_values() {
        let contact = validate_contact(&john().with_id(3), NameRule::Strict).unwrap();
        assert_eq!(contact.id, Some(ContactId::new(3)));
        assert_eq!(contact.first_name.as_str(), "John");
        assert_eq!(contact.last_name.as_str(), "Doe");
        assert_eq!(contact.email.as_str(), "john@doe.com");
        assert_eq!(contact.phone.as_str(), "1234567890");
        assert!(contact.picture_url.is_none());
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut payload = john();
        payload.phone = "12345".to_string();

        let err = validate_contact(&payload, NameRule::Strict).unwrap_err();
        assert!(err.has_field(ContactField::Phone));
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.to_string(), "Phone must be a string of 10 digits");
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut payload = john();
        payload.email = "not-an-email".to_string();

        let err = validate_contact(&payload, NameRule::Strict).unwrap_err();
        assert!(err.has_field(ContactField::Email));
        assert!(err.to_string().contains("Email"));
    }

    #[test]
    fn test_all_failures_collected() {
        let payload = ContactPayload::default();
        let err = validate_contact(&payload, NameRule::Strict).unwrap_err();
        assert_eq!(err.errors().len(), 4);
        assert!(err.has_field(ContactField::FirstName));
        assert!(err.has_field(ContactField::LastName));
        assert!(err.has_field(ContactField::Email));
        assert!(err.has_field(ContactField::Phone));
        assert!(!err.has_field(ContactField::PictureUrl));
    }

    #[test]
    fn test_name_rule_selects_space_handling() {
        let mut payload = john();
        payload.first_name = "Mary Ann".to_string();

        assert!(validate_contact(&payload, NameRule::Strict).is_err());
        assert!(validate_contact(&payload, NameRule::Relaxed).is_ok());
    }

    #[test]
    fn test_picture_validated_when_present() {
        let payload = john().with_picture("https://example.com/me.png");
        let err = validate_contact(&payload, NameRule::Strict).unwrap_err();
        assert!(err.has_field(ContactField::PictureUrl));

        let payload = john().with_picture("data:image/png;base64,aGVsbG8=");
        let contact = validate_contact(&payload, NameRule::Strict).unwrap();
        assert!(contact.picture_url.is_some());

        // An empty picture input means "no picture"
        let payload = john().with_picture("");
        let contact = validate_contact(&payload, NameRule::Strict).unwrap();
        assert!(contact.picture_url.is_none());
    }

    #[test]
    fn test_validate_field() {
        let update = validate_field(ContactField::Phone, "0987654321", NameRule::Strict).unwrap();
        assert_eq!(update.field, ContactField::Phone);
        assert_eq!(update.value, "0987654321");

        let err = validate_field(ContactField::Email, "nope", NameRule::Strict).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Email must be a valid email address and it should not be empty".to_string()]
        );
    }
}
