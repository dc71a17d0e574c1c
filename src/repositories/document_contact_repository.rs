use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult, StoreError};
use crate::models::{Contact, ContactFieldUpdate, DeleteResult};
use crate::repositories::traits::ContactRepository;
use crate::store::{Document, DocumentStore, Filter, NATIVE_KEY};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Contact repository implementation over a document store.
///
/// This repository maps contacts to and from JSON documents and delegates
/// every query to the store; it adds no caching and no uniqueness checks.
pub struct DocumentContactRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentContactRepository {
    /// Create a new DocumentContactRepository over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn by_id(id: ContactId) -> Filter {
        Filter::by_field("id", id.value())
    }
}

fn decode(document: Document) -> ContactResult<Contact> {
    let key = document
        .get(NATIVE_KEY)
        .and_then(Value::as_str)
        .unwrap_or("<none>")
        .to_string();

    serde_json::from_value(Value::Object(document)).map_err(|e| {
        StoreError::InvalidDocument(format!("document {} is not a contact: {}", key, e)).into()
    })
}

fn encode(contact: &Contact) -> ContactResult<Document> {
    match serde_json::to_value(contact).map_err(StoreError::from)? {
        Value::Object(mut document) => {
            // The store owns the native key
            document.remove(NATIVE_KEY);
            Ok(document)
        }
        _ => Err(StoreError::InvalidDocument("contact did not encode as an object".to_string()).into()),
    }
}

#[async_trait]
impl ContactRepository for DocumentContactRepository {
    async fn list(&self) -> ContactResult<Vec<Contact>> {
        let documents = self.store.find(&Filter::all()).await?;
        documents.into_iter().map(decode).collect()
    }

    async fn get(&self, id: ContactId) -> ContactResult<Contact> {
        match self.store.find_one(&Self::by_id(id)).await? {
            Some(document) => decode(document),
            None => Err(ContactError::NotFound),
        }
    }

    async fn create(&self, contact: &Contact) -> ContactResult<Contact> {
        let stored = self.store.insert_one(encode(contact)?).await?;
        decode(stored)
    }

    async fn delete(&self, id: ContactId) -> ContactResult<DeleteResult> {
        let result = self.store.delete_one(&Self::by_id(id)).await?;
        if result.deleted_count == 0 {
            return Err(ContactError::NotFound);
        }
        Ok(result)
    }

    async fn update_field(
        &self,
        id: ContactId,
        update: &ContactFieldUpdate,
    ) -> ContactResult<Contact> {
        let mut set = Document::new();
        set.insert(
            update.field.as_str().to_string(),
            Value::String(update.value.clone()),
        );

        match self.store.find_one_and_update(&Self::by_id(id), set).await? {
            Some(document) => decode(document),
            None => Err(ContactError::NotFound),
        }
    }
}
