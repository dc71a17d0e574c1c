use async_trait::async_trait;
use contact_book::client::AsyncContactClient;
use contact_book::domain::{ContactField, ContactId};
use contact_book::error::{ClientError, ClientResult};
use contact_book::models::{Contact, ContactPayload, DeleteResult};
use contact_book::validation::{validate_contact, validate_field, NameRule};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock API client for view tests.
///
/// Answers the way the server does: an empty list is `NotFound`, payloads
/// and property values are validated with the strict rule, and rejected
/// requests come back as `BadRequest` with the validation messages.
#[derive(Clone, Default)]
pub struct MockContactClient {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_error: Arc<Mutex<Option<ClientError>>>,
}

impl MockContactClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let client = Self::new();
        client.contacts.lock().unwrap().extend(contacts);
        client
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Fail the next call with `error`.
    pub fn fail_next(&self, error: ClientError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        *self.call_counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> ClientResult<()> {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_insert(0) += 1;

        match self.next_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AsyncContactClient for MockContactClient {
    async fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        self.track_call("list_contacts")?;
        let contacts = self.contacts();
        if contacts.is_empty() {
            return Err(ClientError::NotFound);
        }
        Ok(contacts)
    }

    async fn get_contact(&self, id: ContactId) -> ClientResult<Contact> {
        self.track_call("get_contact")?;
        self.contacts()
            .into_iter()
            .find(|c| c.id == Some(id))
            .ok_or(ClientError::NotFound)
    }

    async fn create_contact(&self, payload: &ContactPayload) -> ClientResult<Contact> {
        self.track_call("create_contact")?;
        let mut contact = validate_contact(payload, NameRule::Strict)
            .map_err(|e| ClientError::BadRequest(e.messages()))?;

        let mut contacts = self.contacts.lock().unwrap();
        contact.document_id = Some(format!("doc-{}", contacts.len() + 1));
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn delete_contact(&self, id: ContactId) -> ClientResult<DeleteResult> {
        self.track_call("delete_contact")?;
        let mut contacts = self.contacts.lock().unwrap();
        let index = contacts
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(ClientError::NotFound)?;
        contacts.remove(index);
        Ok(DeleteResult::acknowledged(1))
    }

    async fn update_property(
        &self,
        id: ContactId,
        property_name: &str,
        property_value: &str,
    ) -> ClientResult<Contact> {
        self.track_call("update_property")?;

        let field = property_name
            .parse::<ContactField>()
            .map_err(|e| ClientError::BadRequest(vec![e.to_string()]))?;
        validate_field(field, property_value, NameRule::Strict)
            .map_err(|e| ClientError::BadRequest(e.messages()))?;

        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or(ClientError::NotFound)?;

        let mut payload = contact.to_payload();
        match field {
            ContactField::FirstName => payload.first_name = property_value.to_string(),
            ContactField::LastName => payload.last_name = property_value.to_string(),
            ContactField::Email => payload.email = property_value.to_string(),
            ContactField::Phone => payload.phone = property_value.to_string(),
            ContactField::PictureUrl => payload.picture_url = Some(property_value.to_string()),
        }

        let mut updated = validate_contact(&payload, NameRule::Strict)
            .map_err(|e| ClientError::BadRequest(e.messages()))?;
        updated.document_id = contact.document_id.clone();
        *contact = updated.clone();
        Ok(updated)
    }
}
