//! In-process document store

use super::{Collection, Document, DocumentStore, ID_FIELD, merge_patch, with_new_id};
use crate::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Document store kept in memory, preserving insertion order
///
/// Nothing survives the process; used for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Whether a collection has no documents
    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

fn has_id(doc: &Document, id: &str) -> bool {
    doc.get(ID_FIELD).and_then(|v| v.as_str()) == Some(id)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| has_id(doc, id)))
            .cloned())
    }

    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document> {
        let (_, document) = with_new_id(fields);
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|doc| has_id(doc, id))
            .map(|index| docs.remove(index)))
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| has_id(doc, id)))
        else {
            return Ok(None);
        };
        merge_patch(doc, patch);
        Ok(Some(doc.clone()))
    }
}
