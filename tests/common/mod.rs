//! Common test utilities for Stowage integration tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use stowage::ResolvedModule;

/// A scratch artifact repository backed by a temporary directory
pub struct TestRepo {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the repository root
    pub path: PathBuf,
}

impl TestRepo {
    /// Create a new scratch repository
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a placeholder artifact file and return its path
    #[allow(dead_code)]
    pub fn artifact(&self, name: &str) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, name).expect("Failed to write artifact");
        path
    }

    /// Build a shared module node with one artifact named `{name}-{version}.jar`
    pub fn module(&self, group: &str, name: &str, version: &str) -> Arc<ResolvedModule> {
        let jar = self.artifact(&format!("{name}-{version}.jar"));
        Arc::new(ResolvedModule::new(group, name, version).with_artifact(jar))
    }

    /// Path to an assembly output directory inside the scratch space
    #[allow(dead_code)]
    pub fn out_dir(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Check if a file exists under a root
#[allow(dead_code)]
pub fn file_exists(root: &Path, relative: &str) -> bool {
    root.join(relative).exists()
}
