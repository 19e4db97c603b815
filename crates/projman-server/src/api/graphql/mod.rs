//! GraphQL API module
//!
//! This module assembles the client/project types, the query root and the
//! mutation root into one schema, and exposes the axum handlers serving it.

mod loader;
mod mutation;
mod resolver;
mod schema;
mod types;

pub use loader::ClientLoader;
pub use mutation::*;
pub use schema::*;
pub use types::*;

use crate::ProjmanServer;
use async_graphql::dataloader::DataLoader;
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use projman_core::Repository;
use std::sync::Arc;

/// GraphQL schema type
pub type ProjmanSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Schema construction options
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
    /// Resolve `Project.client` through a batching DataLoader instead of
    /// one lookup per project
    pub batch_client_lookups: bool,
}

/// Create a new GraphQL schema over a repository
pub fn create_schema(repository: Repository, options: SchemaOptions) -> ProjmanSchema {
    let mut builder =
        Schema::build(QueryRoot, MutationRoot, EmptySubscription).data(repository.clone());

    if options.batch_client_lookups {
        builder = builder.data(DataLoader::new(
            ClientLoader::new(repository),
            tokio::spawn,
        ));
    }

    builder.finish()
}

/// Render the schema in SDL
pub fn export_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

/// GraphQL query handler
pub async fn graphql_handler(
    State(server): State<Arc<ProjmanServer>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    server.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL explorer (development only)
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
