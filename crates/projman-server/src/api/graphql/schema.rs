//! Root query type

use crate::api::graphql::types::*;
use async_graphql::{Context, ID, Object, Result as GQLResult};
use projman_core::Repository;

/// Root query type for GraphQL
///
/// Lists are unfiltered and unpaginated, in the order the store returns
/// them. Single lookups return null for unknown ids.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get all clients
    async fn clients(&self, ctx: &Context<'_>) -> GQLResult<Vec<Client>> {
        let repository = ctx.data::<Repository>()?;
        let clients = repository.clients().await?;
        Ok(clients.into_iter().map(Client::from).collect())
    }

    /// Get a client by ID
    async fn client(&self, ctx: &Context<'_>, id: Option<ID>) -> GQLResult<Option<Client>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let repository = ctx.data::<Repository>()?;
        Ok(repository.client(id.as_str()).await?.map(Client::from))
    }

    /// Get all projects
    async fn projects(&self, ctx: &Context<'_>) -> GQLResult<Vec<Project>> {
        let repository = ctx.data::<Repository>()?;
        let projects = repository.projects().await?;
        Ok(projects.into_iter().map(Project::from).collect())
    }

    /// Get a project by ID
    async fn project(&self, ctx: &Context<'_>, id: Option<ID>) -> GQLResult<Option<Project>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let repository = ctx.data::<Repository>()?;
        Ok(repository.project(id.as_str()).await?.map(Project::from))
    }
}
