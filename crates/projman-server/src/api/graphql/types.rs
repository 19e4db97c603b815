//! GraphQL type definitions

use async_graphql::{Enum, ID, SimpleObject};
use projman_core::model;

/// A client that owns projects
#[derive(Debug, Clone, SimpleObject)]
pub struct Client {
    /// Client ID
    pub id: ID,
    /// Client name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
}

impl From<model::Client> for Client {
    fn from(client: model::Client) -> Self {
        Self {
            id: ID::from(client.id),
            name: client.name,
            email: client.email,
            phone: client.phone,
        }
    }
}

/// A project belonging to one client
///
/// Fields are resolved in `resolver.rs`; `client_id` is only reachable
/// through the `client` field.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project ID
    pub id: ID,
    /// Project name
    pub name: String,
    /// Project description
    pub description: String,
    /// Current status
    pub status: model::ProjectStatus,
    /// Owning client ID
    pub client_id: String,
}

impl From<model::Project> for Project {
    fn from(project: model::Project) -> Self {
        Self {
            id: ID::from(project.id),
            name: project.name,
            description: project.description,
            status: project.status,
            client_id: project.client_id,
        }
    }
}

/// Project status accepted by mutations
///
/// Results report the status as its label ("Not Started", "In Progress",
/// "Completed") rather than as one of these values.
///
/// `addProject` and `updateProject` share this enum. Older clients that send
/// `status: Completed` to `addProject` must switch to `completed`; the
/// capitalized value is rejected as unknown.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[graphql(name = "ProjectStatus", remote = "projman_core::model::ProjectStatus")]
pub enum ProjectStatusInput {
    /// Not Started
    #[default]
    #[graphql(name = "new")]
    NotStarted,
    /// In Progress
    #[graphql(name = "progress")]
    InProgress,
    /// Completed
    #[graphql(name = "completed")]
    Completed,
}
