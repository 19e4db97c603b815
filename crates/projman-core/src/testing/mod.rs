//! Testing infrastructure for Projman Core
//!
//! Helpers shared by unit tests and, behind the `testing` feature, by the
//! server's integration tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use projman_core::testing::{TestContext, lmdb_repository, memory_repository};
//!
//! let repository = memory_repository();
//!
//! let ctx = TestContext::new();
//! let persistent = lmdb_repository(&ctx).unwrap();
//! ```

mod context;

pub use context::TestContext;

use crate::Repository;
use crate::Result;
use crate::store::{LmdbStore, MemoryStore};
use std::sync::Arc;

/// Repository over a fresh in-memory store
pub fn memory_repository() -> Repository {
    Repository::new(Arc::new(MemoryStore::new()))
}

/// Repository over an LMDB store living in the context's directory
pub fn lmdb_repository(ctx: &TestContext) -> Result<Repository> {
    let store = LmdbStore::with_map_size(&ctx.path().join("lmdb"), 64 * 1024 * 1024)?;
    Ok(Repository::new(Arc::new(store)))
}
