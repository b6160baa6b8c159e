//! Distribution assembly
//!
//! Ties the pieces together the way a host build would: resolve the closure,
//! stage every included entry's artifacts under the libraries directory,
//! stage the application's own artifact, and attach the bootstrap descriptor
//! when it is complete.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::bootstrap::BootstrapDescriptor;
use crate::error::{Result, StowageError};
use crate::graph::Configuration;
use crate::layout;
use crate::manifest::DistributionManifest;
use crate::module_id::ModuleId;
use crate::resolver::ClosureResolver;
use crate::sink::{CopySink, DirectorySink};

/// A distribution under configuration
///
/// The resolver and descriptor are exposed for progressive configuration;
/// `assemble` runs the whole packaging sequence against an output directory.
#[derive(Debug, Default)]
pub struct Distribution {
    pub resolver: ClosureResolver,
    pub bootstrap: BootstrapDescriptor,
    self_artifact: Option<(PathBuf, ModuleId)>,
}

/// What an assembly run produced
#[derive(Debug)]
pub struct AssemblyReport {
    /// `(source file, destination relative path)` pairs staged under the
    /// libraries directory, in staging order
    pub staged: Vec<(PathBuf, String)>,
    /// Path of the written descriptor, absent when the descriptor was
    /// incomplete
    pub descriptor: Option<PathBuf>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a distribution configured from a manifest
    pub fn from_manifest(manifest: &DistributionManifest) -> Result<Self> {
        let mut distribution = Self::new();
        manifest.apply(&mut distribution.resolver, &mut distribution.bootstrap)?;
        Ok(distribution)
    }

    /// Stage the application's own artifact under the layout rule as well
    pub fn set_self_artifact(&mut self, artifact: impl Into<PathBuf>, id: ModuleId) -> &mut Self {
        self.self_artifact = Some((artifact.into(), id));
        self
    }

    /// Assemble the distribution into `out_dir`
    ///
    /// Resolves the given configurations, copies every included entry's
    /// artifacts into `out_dir/lib`, copies the self artifact when one is
    /// set, and writes `out_dir/bootstrap.xml` when the descriptor is
    /// complete.
    ///
    /// # Errors
    ///
    /// Fails on malformed patterns, copy failures, a self artifact without a
    /// version, or descriptor write failures.
    pub fn assemble(
        &mut self,
        configurations: &[Configuration],
        out_dir: &Path,
    ) -> Result<AssemblyReport> {
        let entries = self.resolver.resolve(configurations)?;

        fs::create_dir_all(out_dir)?;
        let mut sink = DirectorySink::new(out_dir.join(layout::LIBRARIES_DIR));
        for entry in &entries {
            entry.stage_into(&mut sink)?;
        }

        if let Some((artifact, id)) = &self.self_artifact {
            let Some(version) = id.version() else {
                return Err(StowageError::InvalidCoordinate {
                    coordinate: id.to_string(),
                });
            };
            let destination = layout::artifact_path(id.group(), id.name(), version);
            sink.copy(artifact, &destination)?;
        }

        let descriptor_path = out_dir.join(layout::DESCRIPTOR_FILE_NAME);
        let descriptor = self
            .bootstrap
            .write(&descriptor_path)?
            .then_some(descriptor_path);

        Ok(AssemblyReport {
            staged: sink.into_staged(),
            descriptor,
        })
    }
}

/// List every file in a staged distribution tree, as sorted relative paths
pub fn staged_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ResolvedModule;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn artifact(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        path
    }

    #[test]
    fn test_assemble_stages_closure_and_descriptor() {
        let temp = TempDir::new().unwrap();
        let jar = artifact(temp.path(), "foo-1.0.jar");

        let module = Arc::new(
            ResolvedModule::new("com.example", "foo", "1.0").with_artifact(&jar),
        );
        let configuration = Configuration::new("runtime").with_root(module);

        let mut distribution = Distribution::new();
        distribution
            .bootstrap
            .set_module_name("app")
            .set_class_name("com.example.Main");

        let out = temp.path().join("dist");
        let report = distribution.assemble(&[configuration], &out).unwrap();

        assert_eq!(report.staged.len(), 1);
        assert!(out.join("lib/com/example/foo/1.0/foo-1.0.jar").exists());
        assert_eq!(report.descriptor, Some(out.join("bootstrap.xml")));
        assert!(out.join("bootstrap.xml").exists());
    }

    #[test]
    fn test_assemble_without_descriptor_names_skips_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");

        let mut distribution = Distribution::new();
        let report = distribution.assemble(&[], &out).unwrap();
        assert!(report.descriptor.is_none());
        assert!(!out.join("bootstrap.xml").exists());
    }

    #[test]
    fn test_assemble_stages_self_artifact() {
        let temp = TempDir::new().unwrap();
        let jar = artifact(temp.path(), "app-0.1.jar");

        let mut distribution = Distribution::new();
        distribution.set_self_artifact(&jar, ModuleId::with_version("com.example", "app", "0.1"));

        let out = temp.path().join("dist");
        distribution.assemble(&[], &out).unwrap();
        assert!(out.join("lib/com/example/app/0.1/app-0.1.jar").exists());
    }

    #[test]
    fn test_self_artifact_requires_version() {
        let temp = TempDir::new().unwrap();
        let jar = artifact(temp.path(), "app.jar");

        let mut distribution = Distribution::new();
        distribution.set_self_artifact(&jar, ModuleId::new("com.example", "app"));

        let result = distribution.assemble(&[], &temp.path().join("dist"));
        assert!(matches!(
            result.unwrap_err(),
            StowageError::InvalidCoordinate { .. }
        ));
    }

    #[test]
    fn test_staged_files_lists_relative_paths_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("lib/b")).unwrap();
        fs::write(temp.path().join("lib/b/two.jar"), "2").unwrap();
        fs::write(temp.path().join("bootstrap.xml"), "x").unwrap();

        let files = staged_files(temp.path());
        assert_eq!(
            files,
            vec![
                PathBuf::from("bootstrap.xml"),
                PathBuf::from("lib/b/two.jar")
            ]
        );
    }
}
