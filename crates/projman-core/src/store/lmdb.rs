//! LMDB-backed document store

use super::{Collection, Document, DocumentStore, merge_patch, with_new_id};
use crate::{Error, Result};
use async_trait::async_trait;
use heed::types::{SerdeJson, Str};
use heed::{Database, Env, EnvOpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default LMDB map size (1GB)
const DEFAULT_MAP_SIZE: usize = 1024 * 1024 * 1024;

type DocumentDb = Database<Str, SerdeJson<Document>>;

/// Persistent document store using LMDB
///
/// One named database per collection, keyed by document id. Ids are
/// time-ordered, so key order follows creation order.
#[derive(Debug, Clone)]
pub struct LmdbStore {
    /// LMDB environment
    env: Arc<Env>,
    /// Client id → client document
    clients_db: DocumentDb,
    /// Project id → project document
    projects_db: DocumentDb,
    /// Environment directory
    path: PathBuf,
}

impl LmdbStore {
    /// Open or create a store in `path`
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_map_size(path, DEFAULT_MAP_SIZE)
    }

    /// Open or create a store with an explicit LMDB map size
    pub fn with_map_size(path: &Path, map_size: usize) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(Collection::ALL.len() as u32)
                .open(path)?
        };
        let env = Arc::new(env);

        let mut wtxn = env.write_txn()?;
        let clients_db = env.create_database(&mut wtxn, Some(Collection::Clients.name()))?;
        let projects_db = env.create_database(&mut wtxn, Some(Collection::Projects.name()))?;
        wtxn.commit()?;

        tracing::info!("Opened LMDB document store at {:?}", path);

        Ok(Self {
            env,
            clients_db,
            projects_db,
            path: path.to_path_buf(),
        })
    }

    /// Environment directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn db(&self, collection: Collection) -> DocumentDb {
        match collection {
            Collection::Clients => self.clients_db,
            Collection::Projects => self.projects_db,
        }
    }

    /// Run a write transaction on the blocking pool
    ///
    /// `write_txn()` waits for the single LMDB writer lock, which must not
    /// stall a runtime worker.
    async fn write<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&LmdbStore) -> Result<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| Error::internal(format!("LMDB write task failed: {}", e)))?
    }
}

#[async_trait]
impl DocumentStore for LmdbStore {
    fn kind(&self) -> &'static str {
        "lmdb"
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let rtxn = self.env.read_txn()?;
        let mut documents = Vec::new();
        for result in self.db(collection).iter(&rtxn)? {
            let (_, document) = result?;
            documents.push(document);
        }
        Ok(documents)
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let rtxn = self.env.read_txn()?;
        Ok(self.db(collection).get(&rtxn, id)?)
    }

    async fn insert(&self, collection: Collection, fields: Document) -> Result<Document> {
        let (id, document) = with_new_id(fields);
        self.write(move |store| {
            let mut wtxn = store.env.write_txn()?;
            store.db(collection).put(&mut wtxn, id.as_str(), &document)?;
            wtxn.commit()?;
            Ok(document)
        })
        .await
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let id = id.to_string();
        self.write(move |store| {
            let db = store.db(collection);
            let mut wtxn = store.env.write_txn()?;
            let existing = db.get(&wtxn, id.as_str())?;
            if existing.is_some() {
                db.delete(&mut wtxn, id.as_str())?;
            }
            wtxn.commit()?;
            Ok(existing)
        })
        .await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>> {
        let id = id.to_string();
        self.write(move |store| {
            let db = store.db(collection);
            let mut wtxn = store.env.write_txn()?;
            let Some(mut document) = db.get(&wtxn, id.as_str())? else {
                return Ok(None);
            };
            merge_patch(&mut document, patch);
            db.put(&mut wtxn, id.as_str(), &document)?;
            wtxn.commit()?;
            Ok(Some(document))
        })
        .await
    }
}
