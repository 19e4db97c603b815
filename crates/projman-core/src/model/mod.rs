//! Domain model: clients own zero or more projects

mod client;
mod project;
mod status;

pub use client::{Client, NewClient};
pub use project::{NewProject, Project, ProjectPatch};
pub use status::ProjectStatus;

use crate::store::Document;
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a record into a store document
pub fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::invalid_document(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Deserialize a store document into a record
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(document))?)
}
