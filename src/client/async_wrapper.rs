//! Async wrapper around synchronous ContactClient.
//!
//! Runs the blocking HTTP calls on tokio's blocking pool so the view layer
//! can await them without stalling the runtime.

use crate::client::ContactClient;
use crate::domain::ContactId;
use crate::error::{ClientError, ClientResult};
use crate::models::{Contact, ContactPayload, DeleteResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Async contact API operations.
#[async_trait]
pub trait AsyncContactClient: Send + Sync {
    async fn list_contacts(&self) -> ClientResult<Vec<Contact>>;
    async fn get_contact(&self, id: ContactId) -> ClientResult<Contact>;
    async fn create_contact(&self, payload: &ContactPayload) -> ClientResult<Contact>;
    async fn delete_contact(&self, id: ContactId) -> ClientResult<DeleteResult>;
    async fn update_property(
        &self,
        id: ContactId,
        property_name: &str,
        property_value: &str,
    ) -> ClientResult<Contact>;
}

/// Async wrapper around synchronous ContactClient.
#[derive(Clone)]
pub struct AsyncContactClientImpl {
    client: Arc<ContactClient>,
}

impl AsyncContactClientImpl {
    pub fn new(client: ContactClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped client, for its metrics.
    pub fn inner(&self) -> &ContactClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> ClientError {
    ClientError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncContactClient for AsyncContactClientImpl {
    async fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_contacts())
            .await
            .map_err(join_error)?
    }

    async fn get_contact(&self, id: ContactId) -> ClientResult<Contact> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_contact(id))
            .await
            .map_err(join_error)?
    }

    async fn create_contact(&self, payload: &ContactPayload) -> ClientResult<Contact> {
        let client = self.client.clone();
        let payload = payload.clone();

        tokio::task::spawn_blocking(move || client.create_contact(&payload))
            .await
            .map_err(join_error)?
    }

    async fn delete_contact(&self, id: ContactId) -> ClientResult<DeleteResult> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.delete_contact(id))
            .await
            .map_err(join_error)?
    }

    async fn update_property(
        &self,
        id: ContactId,
        property_name: &str,
        property_value: &str,
    ) -> ClientResult<Contact> {
        let client = self.client.clone();
        let property_name = property_name.to_string();
        let property_value = property_value.to_string();

        tokio::task::spawn_blocking(move || {
            client.update_property(id, &property_name, &property_value)
        })
        .await
        .map_err(join_error)?
    }
}
