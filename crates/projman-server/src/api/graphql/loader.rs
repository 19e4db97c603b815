//! Batched client lookups

use async_graphql::dataloader::Loader;
use projman_core::{Repository, model};
use std::collections::HashMap;
use std::sync::Arc;

/// Loads clients by id, one store round-trip per batch
pub struct ClientLoader {
    repository: Repository,
}

impl ClientLoader {
    /// Create a loader reading from `repository`
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}

impl Loader<String> for ClientLoader {
    type Value = model::Client;
    type Error = Arc<projman_core::Error>;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>, Self::Error> {
        tracing::debug!("Loading {} client(s) in one batch", keys.len());
        self.repository.clients_by_ids(keys).await.map_err(Arc::new)
    }
}
