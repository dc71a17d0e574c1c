//! Document store abstraction.
//!
//! Contacts are persisted as schema-flexible JSON documents. A store instance
//! is bound to a single collection and assigns every inserted document a
//! native `_id` key; lookups by the contact's own `id` go through a
//! [`Filter`] on that field like any other.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::{Config, StoreKind};
use crate::error::StoreResult;
use crate::models::DeleteResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Key under which stores record their native identifier.
pub const NATIVE_KEY: &str = "_id";

/// Generate a fresh native key.
pub(crate) fn new_native_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Equality match on top-level document fields, all of which must hold.
///
/// A `null` condition also matches documents that lack the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Match every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents whose `field` equals `value`.
    pub fn by_field(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Add another equality condition.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// The conditions, in the order they were added.
    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether `document` satisfies every condition.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            let actual = document.get(field).unwrap_or(&Value::Null);
            values_equal(actual, expected)
        })
    }
}

/// JSON equality that treats `1` and `1.0` as the same number.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

/// Persistence backend for one collection of documents.
///
/// Implementations guarantee single-document atomicity only. Results follow
/// insertion order, and "first match" means the earliest inserted.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`.
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// The first document matching `filter`.
    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Document>>;

    /// Insert a document, assigning `_id` when absent. Returns it as stored.
    async fn insert_one(&self, document: Document) -> StoreResult<Document>;

    /// Delete the first document matching `filter`.
    async fn delete_one(&self, filter: &Filter) -> StoreResult<DeleteResult>;

    /// Merge `set` into the first document matching `filter` and return the
    /// updated document, or `None` when nothing matched. `_id` in `set` is
    /// ignored.
    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: Document,
    ) -> StoreResult<Option<Document>>;
}

/// Open the store selected by the configuration.
pub fn open(config: &Config) -> StoreResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Sqlite => Arc::new(SqliteStore::open(&config.sqlite_path, &config.collection)?),
    };
    tracing::info!(store = %config.store, collection = %config.collection, "Document store opened");
    Ok(store)
}

/// Apply a `set` to a document in place, leaving the native key alone.
pub(crate) fn merge_set(document: &mut Document, set: Document) {
    for (key, value) in set {
        if key != NATIVE_KEY {
            document.insert(key, value);
        }
    }
}
