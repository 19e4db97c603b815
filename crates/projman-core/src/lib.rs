//! Projman Core - client/project records over a document store
//!
//! This crate provides everything below the GraphQL layer:
//! - Domain model (clients, projects, the shared project status enumeration)
//! - Document store abstraction with in-memory and LMDB-backed adapters
//! - Typed repository implementing the read/write operations, including the
//!   best-effort cascade from a client to its projects
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Repository                      │
//! │  (typed CRUD, cascade delete, status rules) │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │            DocumentStore                     │
//! │   (find / insert / update / delete by id)   │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │     MemoryStore        │      LmdbStore      │
//! └─────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod repository;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Result};
pub use repository::Repository;
pub use store::{Collection, Document, DocumentStore, connect};
