//! GraphQL mutations for creating, updating, and deleting clients and projects

use crate::api::graphql::types::*;
use async_graphql::{Context, ID, Object, Result as GQLResult};
use projman_core::Repository;
use projman_core::model::{NewClient, NewProject, ProjectPatch};

/// Root mutation type for GraphQL
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new client
    async fn add_client(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] name: String,
        #[graphql(validator(min_length = 1))] email: String,
        #[graphql(validator(min_length = 1))] phone: String,
    ) -> GQLResult<Client> {
        let repository = ctx.data::<Repository>()?;
        let client = repository
            .add_client(NewClient { name, email, phone })
            .await?;
        Ok(client.into())
    }

    /// Delete a client together with its projects
    ///
    /// Project deletes are best effort: the client is removed even if some
    /// of them fail.
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> GQLResult<Option<Client>> {
        let repository = ctx.data::<Repository>()?;
        Ok(repository.delete_client(id.as_str()).await?.map(Client::from))
    }

    /// Create a new project for a client
    ///
    /// `status` may be omitted or null, in which case it is `new`.
    async fn add_project(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] name: String,
        #[graphql(validator(min_length = 1))] description: String,
        status: Option<ProjectStatusInput>,
        client_id: ID,
    ) -> GQLResult<Project> {
        let repository = ctx.data::<Repository>()?;
        let project = repository
            .add_project(NewProject {
                name,
                description,
                status: status.unwrap_or_default().into(),
                client_id: client_id.0,
            })
            .await?;
        Ok(project.into())
    }

    /// Delete a project
    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> GQLResult<Option<Project>> {
        let repository = ctx.data::<Repository>()?;
        Ok(repository
            .delete_project(id.as_str())
            .await?
            .map(Project::from))
    }

    /// Update some fields of a project; omitted fields keep their values
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        #[graphql(validator(min_length = 1))] name: Option<String>,
        #[graphql(validator(min_length = 1))] description: Option<String>,
        status: Option<ProjectStatusInput>,
    ) -> GQLResult<Option<Project>> {
        let repository = ctx.data::<Repository>()?;
        let patch = ProjectPatch {
            name,
            description,
            status: status.map(Into::into),
        };
        Ok(repository
            .update_project(id.as_str(), patch)
            .await?
            .map(Project::from))
    }
}
