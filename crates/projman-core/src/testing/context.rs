//! TestContext - owns a temporary directory for the duration of a test

use std::path::Path;
use tempfile::TempDir;

/// Context for managing test resources and lifecycle
///
/// The directory is removed when the context is dropped, so LMDB
/// environments opened inside it must be dropped first.
pub struct TestContext {
    /// Temporary directory for this test
    temp_dir: TempDir,
}

impl TestContext {
    /// Create a new TestContext with a unique temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        Self { temp_dir }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
