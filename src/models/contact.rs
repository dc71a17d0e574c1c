//! Contact model: the stored record and the inbound payload it is validated from.

use crate::domain::{
    ContactField, ContactId, EmailAddress, PersonName, PhoneNumber, PictureUrl,
};
use serde::{Deserialize, Serialize};

/// A stored contact.
///
/// Every field except the two identifiers is a validated value object, so a
/// `Contact` always satisfies the validation rules. JSON keys are the wire
/// names (`FirstName`, `LastName`, `Email`, `Phone`, `PictureUrl`); unknown
/// keys in a stored document are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Native key assigned by the document store on insert.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Caller-assigned identifier used by the REST surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,

    #[serde(rename = "FirstName")]
    pub first_name: PersonName,

    #[serde(rename = "LastName")]
    pub last_name: PersonName,

    #[serde(rename = "Email")]
    pub email: EmailAddress,

    #[serde(rename = "Phone")]
    pub phone: PhoneNumber,

    #[serde(rename = "PictureUrl", default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<PictureUrl>,
}

impl Contact {
    /// Full name for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The current value of an updatable field, `None` for an absent picture.
    pub fn field_value(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::FirstName => Some(self.first_name.as_str()),
            ContactField::LastName => Some(self.last_name.as_str()),
            ContactField::Email => Some(self.email.as_str()),
            ContactField::Phone => Some(self.phone.as_str()),
            ContactField::PictureUrl => self.picture_url.as_ref().map(PictureUrl::as_str),
        }
    }

    /// Convert back into an editable payload.
    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            id: self.id.map(ContactId::value),
            first_name: self.first_name.as_str().to_string(),
            last_name: self.last_name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            phone: self.phone.as_str().to_string(),
            picture_url: self.picture_url.as_ref().map(|p| p.as_str().to_string()),
        }
    }
}

/// An unvalidated contact as submitted by a client.
///
/// Missing string fields default to empty so that they fail validation with a
/// field-level message instead of a JSON shape error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "FirstName", default)]
    pub first_name: String,

    #[serde(rename = "LastName", default)]
    pub last_name: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "PictureUrl", default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

impl ContactPayload {
    /// Build a payload from the four required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            picture_url: None,
        }
    }

    /// Set the caller-assigned ID.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a data-URL picture.
    pub fn with_picture(mut self, picture_url: impl Into<String>) -> Self {
        self.picture_url = Some(picture_url.into());
        self
    }

    /// The raw value submitted for a field.
    pub fn field_value(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::FirstName => Some(self.first_name.as_str()),
            ContactField::LastName => Some(self.last_name.as_str()),
            ContactField::Email => Some(self.email.as_str()),
            ContactField::Phone => Some(self.phone.as_str()),
            ContactField::PictureUrl => self.picture_url.as_deref(),
        }
    }
}

/// A single validated property change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFieldUpdate {
    pub field: ContactField,
    pub value: String,
}

/// Report returned by a delete, mirroring the store's acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    /// An acknowledged deletion of `deleted_count` documents.
    pub fn acknowledged(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john() -> Contact {
        Contact {
            document_id: None,
            id: Some(ContactId::new(1)),
            first_name: PersonName::new("John").unwrap(),
            last_name: PersonName::new("Doe").unwrap(),
            email: EmailAddress::new("john@doe.com").unwrap(),
            phone: PhoneNumber::new("1234567890").unwrap(),
            picture_url: None,
        }
    }

    #[test]
    fn test_contact_serialization_uses_wire_names() {
        let value = serde_json::to_value(john()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "FirstName": "John",
                "LastName": "Doe",
                "Email": "john@doe.com",
                "Phone": "1234567890"
            })
        );
    }

    #[test]
    fn test_contact_deserialization_ignores_store_extras() {
        let contact: Contact = serde_json::from_value(json!({
            "_id": "abc",
            "__v": 0,
            "id": 1,
            "FirstName": "John",
            "LastName": "Doe",
            "Email": "john@doe.com",
            "Phone": "1234567890"
        }))
        .unwrap();
        assert_eq!(contact.document_id.as_deref(), Some("abc"));
        assert_eq!(contact.full_name(), "John Doe");
    }

    #[test]
    fn test_contact_deserialization_validates() {
        let result: Result<Contact, _> = serde_json::from_value(json!({
            "FirstName": "John",
            "LastName": "Doe",
            "Email": "john@doe.com",
            "Phone": "12345"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_defaults_missing_fields() {
        let payload: ContactPayload = serde_json::from_value(json!({ "FirstName": "John" })).unwrap();
        assert_eq!(payload.first_name, "John");
        assert_eq!(payload.phone, "");
        assert_eq!(payload.id, None);
    }

    #[test]
    fn test_contact_to_payload() {
        let payload = john().to_payload();
        assert_eq!(
            payload,
            ContactPayload::new("John", "Doe", "john@doe.com", "1234567890").with_id(1)
        );
    }

    #[test]
    fn test_delete_result_wire_format() {
        let value = serde_json::to_value(DeleteResult::acknowledged(1)).unwrap();
        assert_eq!(value, json!({ "acknowledged": true, "deletedCount": 1 }));
    }
}
