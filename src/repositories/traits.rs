use crate::domain::ContactId;
use crate::error::ContactResult;
use crate::models::{Contact, ContactFieldUpdate, DeleteResult};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval, enabling
/// different implementations (document store, mock). Contacts are addressed
/// by their caller-assigned `id`, never by the store's native key.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve every contact, in insertion order. An empty collection is
    /// not an error here.
    async fn list(&self) -> ContactResult<Vec<Contact>>;

    /// Retrieve the first contact whose `id` matches.
    async fn get(&self, id: ContactId) -> ContactResult<Contact>;

    /// Persist a validated contact and return it as stored.
    async fn create(&self, contact: &Contact) -> ContactResult<Contact>;

    /// Delete the first contact whose `id` matches.
    async fn delete(&self, id: ContactId) -> ContactResult<DeleteResult>;

    /// Overwrite one property of the first contact whose `id` matches.
    async fn update_field(&self, id: ContactId, update: &ContactFieldUpdate)
        -> ContactResult<Contact>;
}
