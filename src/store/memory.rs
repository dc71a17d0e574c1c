use super::{merge_set, new_native_key, Document, DocumentStore, Filter, NATIVE_KEY};
use crate::error::StoreResult;
use crate::models::DeleteResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process document store.
///
/// Suitable for development and tests; contents are lost when the process
/// exits. Cloning shares the underlying collection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| filter.matches(d)).cloned())
    }

    async fn insert_one(&self, mut document: Document) -> StoreResult<Document> {
        if !document.contains_key(NATIVE_KEY) {
            document.insert(NATIVE_KEY.to_string(), Value::String(new_native_key()));
        }

        let mut documents = self.documents.write().await;
        documents.push(document.clone());
        Ok(document)
    }

    async fn delete_one(&self, filter: &Filter) -> StoreResult<DeleteResult> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::acknowledged(1))
            }
            None => Ok(DeleteResult::acknowledged(0)),
        }
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.iter_mut().find(|d| filter.matches(d)) else {
            return Ok(None);
        };

        merge_set(document, set);
        Ok(Some(document.clone()))
    }
}
