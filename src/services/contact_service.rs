//! Contact service layer.
//!
//! Business logic for listing, fetching, creating, deleting and
//! single-property updates of contacts.

use crate::domain::{ContactField, ContactId, ValidationError};
use crate::error::{ContactError, ContactResult};
use crate::metrics::Metrics;
use crate::models::{Contact, ContactPayload, DeleteResult};
use crate::repositories::ContactRepository;
use crate::validation::{validate_contact, validate_field, NameRule};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts. May be `NotFound` for an empty collection, depending on
    /// the empty-list policy.
    async fn list_contacts(&self) -> ContactResult<Vec<Contact>>;

    /// A single contact by its caller-assigned ID.
    async fn get_contact(&self, id: ContactId) -> ContactResult<Contact>;

    /// Validate and persist a new contact.
    async fn create_contact(&self, payload: ContactPayload) -> ContactResult<Contact>;

    /// Delete a contact by ID.
    async fn delete_contact(&self, id: ContactId) -> ContactResult<DeleteResult>;

    /// Change one property, named by its wire name, of a contact.
    ///
    /// Only the fields in [`ContactField`] are writable; the new value must
    /// pass that field's validation rule.
    async fn update_contact_property(
        &self,
        id: ContactId,
        property_name: &str,
        property_value: &str,
    ) -> ContactResult<Contact>;

    /// Counters for this service.
    fn metrics(&self) -> &Metrics;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    empty_list_not_found: bool,
    metrics: Metrics,
}

impl ContactServiceImpl {
    /// Create a new contact service. An empty list is reported as
    /// `NotFound`, matching the established API behaviour.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self {
            repository,
            empty_list_not_found: true,
            metrics: Metrics::new(),
        }
    }

    /// Choose whether an empty collection lists as `NotFound` (`true`) or as
    /// an empty array (`false`).
    pub fn with_empty_list_not_found(mut self, enabled: bool) -> Self {
        self.empty_list_not_found = enabled;
        self
    }

    fn parse_property(property_name: &str) -> ContactResult<ContactField> {
        property_name.parse::<ContactField>().map_err(|e| match e {
            ValidationError::ProtectedField(name) => {
                ContactError::InvalidProperty(format!("{} cannot be updated", name))
            }
            ValidationError::UnknownField(name) if name.is_empty() => {
                ContactError::InvalidProperty("property_name is required".to_string())
            }
            other => ContactError::InvalidProperty(other.to_string()),
        })
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self) -> ContactResult<Vec<Contact>> {
        let contacts = self.repository.list().await?;
        debug!(count = contacts.len(), "Listed contacts");

        if contacts.is_empty() && self.empty_list_not_found {
            return Err(ContactError::NotFound);
        }

        self.metrics.record_contacts_listed(contacts.len());
        Ok(contacts)
    }

    async fn get_contact(&self, id: ContactId) -> ContactResult<Contact> {
        self.repository.get(id).await
    }

    async fn create_contact(&self, payload: ContactPayload) -> ContactResult<Contact> {
        info!(id = ?payload.id, "Received create contact request");

        let contact = validate_contact(&payload, NameRule::Strict).map_err(|e| {
            self.metrics.record_validation_failure();
            debug!(errors = %e, "Rejected contact payload");
            ContactError::from(e)
        })?;

        // Caller-assigned IDs are not unique; flag collisions without rejecting them
        if let Some(id) = contact.id {
            match self.repository.get(id).await {
                Ok(_) => warn!(id = %id, "Creating contact with an ID that is already in use"),
                Err(ContactError::NotFound) => {}
                Err(e) => return Err(e),
            }
        }

        let created = self.repository.create(&contact).await?;
        self.metrics.record_contact_created();
        info!(
            id = ?created.id,
            document_id = created.document_id.as_deref().unwrap_or(""),
            "New contact created"
        );
        Ok(created)
    }

    async fn delete_contact(&self, id: ContactId) -> ContactResult<DeleteResult> {
        let result = self.repository.delete(id).await?;
        self.metrics.record_contact_deleted();
        info!(id = %id, "Contact deleted");
        Ok(result)
    }

    async fn update_contact_property(
        &self,
        id: ContactId,
        property_name: &str,
        property_value: &str,
    ) -> ContactResult<Contact> {
        info!(id = %id, property = property_name, "Received update contact request");

        let field = Self::parse_property(property_name)?;
        let update = validate_field(field, property_value, NameRule::Strict).map_err(|e| {
            self.metrics.record_validation_failure();
            ContactError::from(e)
        })?;

        let updated = self.repository.update_field(id, &update).await.map_err(|e| {
            if matches!(e, ContactError::NotFound) {
                debug!(id = %id, "Contact not found for update");
            }
            e
        })?;

        self.metrics.record_contact_updated();
        info!(id = %id, property = %field, "Contact updated");
        Ok(updated)
    }

    fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
