use super::ProjectStatus;
use serde::{Deserialize, Serialize};

/// A stored project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Identifier assigned by the store
    pub id: String,
    /// Project name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Current status
    #[serde(default)]
    pub status: ProjectStatus,
    /// Id of the owning client. Not checked against the clients collection.
    #[serde(rename = "clientId")]
    pub client_id: String,
}

/// Fields for creating a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Initial status
    #[serde(default)]
    pub status: ProjectStatus,
    /// Id of the owning client
    #[serde(rename = "clientId")]
    pub client_id: String,
}

/// Partial update for a project
///
/// Only fields set to `Some` are written; `None` leaves the stored value
/// untouched rather than clearing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}
