//! Copy-sink abstraction for staging artifacts
//!
//! The resolver produces `(source file, destination relative path)` pairs;
//! a sink decides what to do with them. [`DirectorySink`] copies into a
//! directory tree and records what it staged.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StowageError};

/// Accepts `(source file, destination relative path)` copy instructions
pub trait CopySink {
    /// Stage one artifact under the given relative destination path
    ///
    /// # Errors
    ///
    /// Returns an error when the artifact cannot be staged.
    fn copy(&mut self, source: &Path, destination: &str) -> Result<()>;
}

/// A sink that copies artifacts into a root directory
///
/// Parent directories are created as needed. Every staged pair is recorded
/// for later inspection.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    staged: Vec<(PathBuf, String)>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staged: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `(source, destination)` pairs staged so far, in staging order
    pub fn staged(&self) -> &[(PathBuf, String)] {
        &self.staged
    }

    pub fn into_staged(self) -> Vec<(PathBuf, String)> {
        self.staged
    }
}

impl CopySink for DirectorySink {
    fn copy(&mut self, source: &Path, destination: &str) -> Result<()> {
        let target = self.root.join(destination);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| StowageError::FileCopyFailed {
                source_path: source.display().to_string(),
                destination: destination.to_string(),
                reason: e.to_string(),
            })?;
        }
        fs::copy(source, &target).map_err(|e| StowageError::FileCopyFailed {
            source_path: source.display().to_string(),
            destination: destination.to_string(),
            reason: e.to_string(),
        })?;
        self.staged
            .push((source.to_path_buf(), destination.to_string()));
        Ok(())
    }
}
