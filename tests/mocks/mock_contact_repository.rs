use async_trait::async_trait;
use contact_book::domain::{ContactField, ContactId};
use contact_book::error::{ContactError, ContactResult, StoreError};
use contact_book::models::{Contact, ContactFieldUpdate, DeleteResult};
use contact_book::repositories::ContactRepository;
use contact_book::validation::{validate_contact, NameRule};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// easily configured with test data and tracks method calls for verification.
/// Contacts keep insertion order and duplicate IDs are allowed.
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<AtomicBool>,
}

impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a contact to the mock repository.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Add multiple contacts to the mock repository.
    pub fn add_contacts(&self, contacts_list: Vec<Contact>) {
        self.contacts.lock().unwrap().extend(contacts_list);
    }

    /// Snapshot of the stored contacts.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Make every following call fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    /// Clear all contacts from the repository.
    pub fn clear(&self) {
        self.contacts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> ContactResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::TaskJoin("mock store unavailable".to_string()).into());
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn list(&self) -> ContactResult<Vec<Contact>> {
        self.track_call("list")?;
        Ok(self.contacts())
    }

    async fn get(&self, id: ContactId) -> ContactResult<Contact> {
        self.track_call("get")?;

        let contacts = self.contacts.lock().unwrap();
        contacts
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or(ContactError::NotFound)
    }

    async fn create(&self, contact: &Contact) -> ContactResult<Contact> {
        self.track_call("create")?;

        let mut contacts = self.contacts.lock().unwrap();
        let mut stored = contact.clone();
        stored.document_id = Some(format!("mock-{}", contacts.len() + 1));
        contacts.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: ContactId) -> ContactResult<DeleteResult> {
        self.track_call("delete")?;

        let mut contacts = self.contacts.lock().unwrap();
        let index = contacts
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(ContactError::NotFound)?;
        contacts.remove(index);
        Ok(DeleteResult::acknowledged(1))
    }

    async fn update_field(
        &self,
        id: ContactId,
        update: &ContactFieldUpdate,
    ) -> ContactResult<Contact> {
        self.track_call("update_field")?;

        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or(ContactError::NotFound)?;

        let mut payload = contact.to_payload();
        match update.field {
            ContactField::FirstName => payload.first_name = update.value.clone(),
            ContactField::LastName => payload.last_name = update.value.clone(),
            ContactField::Email => payload.email = update.value.clone(),
            ContactField::Phone => payload.phone = update.value.clone(),
            ContactField::PictureUrl => payload.picture_url = Some(update.value.clone()),
        }

        let mut updated = validate_contact(&payload, NameRule::Relaxed)?;
        updated.document_id = contact.document_id.clone();
        *contact = updated.clone();
        Ok(updated)
    }
}
