use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a project
///
/// Stored and reported by its human-readable label. New projects start as
/// [`ProjectStatus::NotStarted`] unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Work has not begun
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    /// Work is underway
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is done
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    /// Label used in storage and in query results
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
