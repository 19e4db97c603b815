//! Document store abstraction
//!
//! A store holds two collections of JSON documents keyed by a generated id.
//! Adapters only need to provide the single-document primitives; filtered
//! and batched lookups have default implementations built on top of them.

mod lmdb;
mod memory;

pub use lmdb::LmdbStore;
pub use memory::MemoryStore;

use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A stored record: a JSON object that always carries an `id` key
pub type Document = serde_json::Map<String, Value>;

/// Key under which every document stores its identifier
pub const ID_FIELD: &str = "id";

/// Named group of documents of one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Client documents
    Clients,
    /// Project documents
    Projects,
}

impl Collection {
    /// Every collection, in a stable order
    pub const ALL: [Collection; 2] = [Collection::Clients, Collection::Projects];

    /// Collection name as used by the adapters
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Projects => "projects",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Persistence adapter used by the repository
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short adapter name for logs and health output
    fn kind(&self) -> &'static str;

    /// All documents of a collection
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>>;

    /// One document by id, `None` when no document has that id
    async fn find_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>>;

    /// Insert a new document; the store assigns and returns its id
    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document>;

    /// Remove a document, returning what was stored
    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>>;

    /// Merge `patch` into a stored document, returning the updated document
    ///
    /// Keys absent from `patch` keep their stored values. The `id` key is
    /// never overwritten.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>>;

    /// Documents whose `field` equals `value`
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>> {
        let documents = self.find_all(collection).await?;
        Ok(documents
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }

    /// Documents for a set of ids; ids with no document are skipped
    async fn find_by_ids(&self, collection: Collection, ids: &[String]) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(doc) = self.find_by_id(collection, id).await? {
                documents.push(doc);
            }
        }
        Ok(documents)
    }
}

/// Generate a new document id
///
/// UUIDv7 in simple form: 32 hex characters that sort by creation time.
pub fn generate_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}

/// Merge `patch` into `document`, leaving the id untouched
pub(crate) fn merge_patch(document: &mut Document, patch: Document) {
    for (key, value) in patch {
        if key != ID_FIELD {
            document.insert(key, value);
        }
    }
}

/// Build a document from insert fields plus a fresh id
pub(crate) fn with_new_id(mut fields: Document) -> (String, Document) {
    let id = generate_id();
    fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    (id, fields)
}

/// Open a store from a connection string
///
/// Recognized forms:
/// - `memory://` for a process-local store
/// - `lmdb://<dir>` or a bare directory path for an LMDB environment
pub fn connect(url: &str) -> Result<Arc<dyn DocumentStore>> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::UnsupportedUrl("empty connection string".to_string()));
    }

    if url == "memory://" || url == "memory" {
        tracing::debug!("Opening in-memory document store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = if let Some(path) = url.strip_prefix("lmdb://") {
        path
    } else if url.contains("://") {
        return Err(Error::UnsupportedUrl(url.to_string()));
    } else {
        url
    };

    if path.is_empty() {
        return Err(Error::UnsupportedUrl(url.to_string()));
    }

    tracing::debug!("Opening LMDB document store at {}", path);
    Ok(Arc::new(LmdbStore::open(Path::new(path))?))
}
