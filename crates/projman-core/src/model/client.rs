use serde::{Deserialize, Serialize};

/// A stored client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Identifier assigned by the store
    pub id: String,
    /// Client name
    pub name: String,
    /// Contact email (no format or uniqueness check)
    pub email: String,
    /// Contact phone
    pub phone: String,
}

/// Fields for creating a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Client name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
}
