//! Resolved dependency graph types
//!
//! These types are supplied by the external dependency-resolution step and
//! consumed, not owned, by the closure resolver. Children are shared via
//! `Arc` because the graph is a forest of DAGs: the same module may be
//! reachable through several parents.

use std::path::PathBuf;
use std::sync::Arc;

use crate::module_id::ModuleId;

/// A resolved dependency graph node
///
/// Version is always present on a resolved module; only match patterns leave
/// it absent.
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    pub group: String,
    pub name: String,
    pub version: String,
    /// Artifact files owned by this module
    pub artifacts: Vec<PathBuf>,
    /// Child dependencies; may be shared with other parents
    pub children: Vec<Arc<ResolvedModule>>,
}

impl ResolvedModule {
    /// Create a module with no artifacts and no children
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            artifacts: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an artifact file
    #[must_use]
    pub fn with_artifact(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifacts.push(path.into());
        self
    }

    /// Add a child dependency
    #[must_use]
    pub fn with_child(mut self, child: Arc<ResolvedModule>) -> Self {
        self.children.push(child);
        self
    }

    /// The module's literal coordinates
    pub fn id(&self) -> ModuleId {
        ModuleId::with_version(&self.group, &self.name, &self.version)
    }
}

/// One named configuration's first-level dependency forest
#[derive(Debug, Clone)]
pub struct Configuration {
    pub name: String,
    pub roots: Vec<Arc<ResolvedModule>>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    /// Add a first-level dependency
    #[must_use]
    pub fn with_root(mut self, root: Arc<ResolvedModule>) -> Self {
        self.roots.push(root);
        self
    }
}
