//! Typed access to clients and projects
//!
//! The repository turns store documents into model records and owns the
//! few rules that span collections, such as removing a client's projects
//! when the client goes away.

use crate::model::{
    Client, NewClient, NewProject, Project, ProjectPatch, from_document, to_document,
};
use crate::store::{Collection, Document, DocumentStore};
use crate::Result;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Field on project documents referencing the owning client
const CLIENT_ID_FIELD: &str = "clientId";

/// Typed repository over a document store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("store", &self.store.kind())
            .finish()
    }
}

fn decode_all<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>> {
    documents.into_iter().map(from_document).collect()
}

fn decode_one<T: DeserializeOwned>(document: Option<Document>) -> Result<Option<T>> {
    document.map(from_document).transpose()
}

impl Repository {
    /// Create a repository over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Adapter name of the underlying store
    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// All clients, in store order
    pub async fn clients(&self) -> Result<Vec<Client>> {
        decode_all(self.store.find_all(Collection::Clients).await?)
    }

    /// One client, `None` when the id matches nothing
    pub async fn client(&self, id: &str) -> Result<Option<Client>> {
        decode_one(self.store.find_by_id(Collection::Clients, id).await?)
    }

    /// Clients for a batch of ids, keyed by id; unknown ids are absent
    pub async fn clients_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Client>> {
        let documents = self.store.find_by_ids(Collection::Clients, ids).await?;
        let clients: Vec<Client> = decode_all(documents)?;
        Ok(clients
            .into_iter()
            .map(|client| (client.id.clone(), client))
            .collect())
    }

    /// All projects, in store order
    pub async fn projects(&self) -> Result<Vec<Project>> {
        decode_all(self.store.find_all(Collection::Projects).await?)
    }

    /// One project, `None` when the id matches nothing
    pub async fn project(&self, id: &str) -> Result<Option<Project>> {
        decode_one(self.store.find_by_id(Collection::Projects, id).await?)
    }

    /// Projects owned by a client
    pub async fn projects_for_client(&self, client_id: &str) -> Result<Vec<Project>> {
        let documents = self
            .store
            .find_by_field(
                Collection::Projects,
                CLIENT_ID_FIELD,
                &Value::String(client_id.to_string()),
            )
            .await?;
        decode_all(documents)
    }

    /// Persist a new client
    pub async fn add_client(&self, client: NewClient) -> Result<Client> {
        let document = self
            .store
            .insert(Collection::Clients, to_document(&client)?)
            .await?;
        let client: Client = from_document(document)?;
        info!("Created client {}", client.id);
        Ok(client)
    }

    /// Delete a client and, best effort, every project it owns
    ///
    /// Each project is deleted independently. A failed project delete is
    /// logged and skipped; it neither stops the other deletes nor the
    /// deletion of the client. Nothing is rolled back.
    pub async fn delete_client(&self, id: &str) -> Result<Option<Client>> {
        match self.projects_for_client(id).await {
            Ok(projects) => {
                let deletes = projects.iter().map(|project| async move {
                    let result = self
                        .store
                        .delete_by_id(Collection::Projects, &project.id)
                        .await;
                    (project.id.as_str(), result)
                });

                let mut removed = 0usize;
                for (project_id, result) in join_all(deletes).await {
                    match result {
                        Ok(Some(_)) => removed += 1,
                        Ok(None) => {}
                        Err(e) => warn!(
                            "Failed to delete project {} of client {}: {}",
                            project_id, id, e
                        ),
                    }
                }
                debug!("Removed {} project(s) of client {}", removed, id);
            }
            Err(e) => warn!("Failed to look up projects of client {}: {}", id, e),
        }

        let client = decode_one::<Client>(self.store.delete_by_id(Collection::Clients, id).await?)?;
        if client.is_some() {
            info!("Deleted client {}", id);
        }
        Ok(client)
    }

    /// Persist a new project
    ///
    /// The owning client is not checked for existence.
    pub async fn add_project(&self, project: NewProject) -> Result<Project> {
        let document = self
            .store
            .insert(Collection::Projects, to_document(&project)?)
            .await?;
        let project: Project = from_document(document)?;
        info!("Created project {} for client {}", project.id, project.client_id);
        Ok(project)
    }

    /// Apply a partial update to a project
    pub async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<Option<Project>> {
        if patch.is_empty() {
            return self.project(id).await;
        }
        let document = self
            .store
            .update_by_id(Collection::Projects, id, to_document(&patch)?)
            .await?;
        let project = decode_one::<Project>(document)?;
        if project.is_some() {
            debug!("Updated project {}", id);
        }
        Ok(project)
    }

    /// Delete a project, returning what was stored
    pub async fn delete_project(&self, id: &str) -> Result<Option<Project>> {
        let project = decode_one::<Project>(self.store.delete_by_id(Collection::Projects, id).await?)?;
        if project.is_some() {
            info!("Deleted project {}", id);
        }
        Ok(project)
    }
}
