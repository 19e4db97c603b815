//! Projman Server - GraphQL API for clients and projects
//!
//! Provides:
//! - POST /graphql - Execute GraphQL queries and mutations
//! - GET /graphql - GraphiQL explorer (development only)
//! - GET /health - Server and document store health
//! - GET /* - Pre-built front-end with single-page-app fallback

use projman_core::Repository;
use std::time::{Duration, Instant};

pub mod api;
pub mod config;
pub mod middleware;

use api::graphql::{ProjmanSchema, SchemaOptions, create_schema};
use config::Config;

/// Projman server state
pub struct ProjmanServer {
    /// Resolved configuration
    pub config: Config,
    /// Typed access to the document store
    pub repository: Repository,
    /// GraphQL schema served on /graphql
    pub schema: ProjmanSchema,
    /// Process start, for uptime reporting
    started_at: Instant,
}

impl ProjmanServer {
    /// Create a new server instance
    pub fn new(config: Config, repository: Repository) -> Self {
        let schema = create_schema(
            repository.clone(),
            SchemaOptions {
                batch_client_lookups: config.batch_client_lookups,
            },
        );

        Self {
            config,
            repository,
            schema,
            started_at: Instant::now(),
        }
    }

    /// Time since the server was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
