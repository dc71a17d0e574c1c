use super::{merge_set, new_native_key, Document, DocumentStore, Filter, NATIVE_KEY};
use crate::error::{StoreError, StoreResult};
use crate::models::DeleteResult;
use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Document store backed by a SQLite file.
///
/// Each collection is a table of JSON text bodies; filters are evaluated by
/// SQLite with `json_extract`. `rusqlite` is blocking, so every call runs on
/// the tokio blocking pool while holding the single connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the collection's
    /// table exists. `":memory:"` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>, collection: &str) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, collection)
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory(collection: &str) -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, collection)
    }

    fn with_connection(conn: Connection, collection: &str) -> StoreResult<Self> {
        if collection.is_empty()
            || !collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS \"{collection}\" (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                doc_id TEXT NOT NULL UNIQUE,
                body TEXT NOT NULL
            );"
        ))?;

        tracing::debug!(collection = %collection, "SQLite collection ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table: collection.to_string(),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection, &str) -> StoreResult<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        let table = self.table.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::TaskJoin("connection lock poisoned".to_string()))?;
            f(&mut guard, &table)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(format!("Task join error: {}", e)))?
    }
}

/// Translate a filter into a `WHERE` clause and its bound parameters.
fn where_clause(filter: &Filter) -> StoreResult<(String, Vec<SqlValue>)> {
    if filter.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut clauses = Vec::with_capacity(filter.conditions().len());
    let mut bound = Vec::new();

    for (field, value) in filter.conditions() {
        if field.contains('"') || field.contains('\\') {
            return Err(StoreError::InvalidDocument(format!(
                "unsupported field name in filter: {}",
                field
            )));
        }

        bound.push(SqlValue::Text(format!("$.\"{}\"", field)));
        let path = bound.len();

        match to_sql_value(value)? {
            None => clauses.push(format!("json_extract(body, ?{path}) IS NULL")),
            Some(v) => {
                bound.push(v);
                clauses.push(format!("json_extract(body, ?{path}) = ?{}", bound.len()));
            }
        }
    }

    Ok((format!(" WHERE {}", clauses.join(" AND ")), bound))
}

/// The SQL value `json_extract` yields for a JSON value, `None` for null.
fn to_sql_value(value: &Value) -> StoreResult<Option<SqlValue>> {
    Ok(match value {
        Value::Null => None,
        Value::Bool(b) => Some(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Some(SqlValue::Text(serde_json::to_string(value)?)),
    })
}

fn parse_body(body: &str) -> StoreResult<Document> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(document) => Ok(document),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}

/// The `seq` and body of the first matching row.
fn first_match(
    conn: &Connection,
    table: &str,
    filter: &Filter,
) -> StoreResult<Option<(i64, Document)>> {
    let (clause, bound) = where_clause(filter)?;
    let sql = format!("SELECT seq, body FROM \"{table}\"{clause} ORDER BY seq LIMIT 1");

    let row = conn
        .query_row(&sql, params_from_iter(bound), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .optional()?;

    row.map(|(seq, body)| Ok((seq, parse_body(&body)?)))
        .transpose()
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<Document>> {
        let filter = filter.clone();
        self.with_conn(move |conn, table| {
            let (clause, bound) = where_clause(&filter)?;
            let sql = format!("SELECT body FROM \"{table}\"{clause} ORDER BY seq");

            let mut stmt = conn.prepare(&sql)?;
            let bodies = stmt
                .query_map(params_from_iter(bound), |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            bodies.iter().map(|body| parse_body(body)).collect()
        })
        .await
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Document>> {
        let filter = filter.clone();
        self.with_conn(move |conn, table| {
            Ok(first_match(conn, table, &filter)?.map(|(_, document)| document))
        })
        .await
    }

    async fn insert_one(&self, mut document: Document) -> StoreResult<Document> {
        let doc_id = match document.get(NATIVE_KEY) {
            Some(Value::String(key)) => key.clone(),
            Some(other) => {
                return Err(StoreError::InvalidDocument(format!(
                    "{} must be a string, found {}",
                    NATIVE_KEY, other
                )))
            }
            None => {
                let key = new_native_key();
                document.insert(NATIVE_KEY.to_string(), Value::String(key.clone()));
                key
            }
        };

        self.with_conn(move |conn, table| {
            let body = serde_json::to_string(&document)?;
            conn.execute(
                &format!("INSERT INTO \"{table}\" (doc_id, body) VALUES (?1, ?2)"),
                params![doc_id, body],
            )?;
            Ok(document)
        })
        .await
    }

    async fn delete_one(&self, filter: &Filter) -> StoreResult<DeleteResult> {
        let filter = filter.clone();
        self.with_conn(move |conn, table| {
            let (clause, bound) = where_clause(&filter)?;
            let sql = format!(
                "DELETE FROM \"{table}\" WHERE seq = \
                 (SELECT seq FROM \"{table}\"{clause} ORDER BY seq LIMIT 1)"
            );
            let deleted = conn.execute(&sql, params_from_iter(bound))?;
            Ok(DeleteResult::acknowledged(deleted as u64))
        })
        .await
    }

    async fn find_one_and_update(
        &self,
        filter: &Filter,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        let filter = filter.clone();
        self.with_conn(move |conn, table| {
            let tx = conn.transaction()?;

            let Some((seq, mut document)) = first_match(&tx, table, &filter)? else {
                return Ok(None);
            };

            merge_set(&mut document, set);
            tx.execute(
                &format!("UPDATE \"{table}\" SET body = ?1 WHERE seq = ?2"),
                params![serde_json::to_string(&document)?, seq],
            )?;
            tx.commit()?;

            Ok(Some(document))
        })
        .await
    }
}
