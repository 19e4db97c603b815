//! Field resolvers for projects
//!
//! `Project.client` is resolved lazily, only when selected. By default each
//! project performs its own lookup; when the schema carries a
//! [`ClientLoader`] the lookups of sibling projects are batched instead.

use crate::api::graphql::loader::ClientLoader;
use crate::api::graphql::types::*;
use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, ID, Object, Result as GQLResult};
use projman_core::Repository;

#[Object]
impl Project {
    /// Get the project ID
    async fn id(&self) -> &ID {
        &self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> &str {
        &self.description
    }

    /// Status label: "Not Started", "In Progress" or "Completed"
    async fn status(&self) -> &'static str {
        self.status.as_str()
    }

    /// The client owning this project, null if it no longer exists
    async fn client(&self, ctx: &Context<'_>) -> GQLResult<Option<Client>> {
        if let Some(loader) = ctx.data_opt::<DataLoader<ClientLoader>>() {
            let client = loader.load_one(self.client_id.clone()).await?;
            return Ok(client.map(Client::from));
        }

        let repository = ctx.data::<Repository>()?;
        let client = repository.client(&self.client_id).await?;
        Ok(client.map(Client::from))
    }
}
