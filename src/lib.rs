//! Stowage - distribution packaging for applications and their dependencies
//!
//! Packages an application and a filtered subset of its resolved runtime
//! dependencies into a distributable layout, and optionally emits a
//! bootstrap descriptor that tells a launcher where to find classes and
//! library artifacts at startup.
//!
//! The heart of the crate is the dependency-closure resolver: given a
//! resolved dependency graph and a set of include/exclude rules pattern-
//! matched against `group:name:version` coordinates, it computes the exact
//! set of artifacts to place in the output, with deterministic precedence,
//! deduplication and renaming. Stowage trusts an already-resolved graph: it
//! does not fetch artifacts, arbitrate version conflicts, or validate
//! artifact contents.
//!
//! # Core Modules
//!
//! - [`module_id`] - Module coordinates and regular-expression matching
//! - [`graph`] - Resolved dependency graph types supplied by the host build
//! - [`resolver`] - Rule table, closure walk and entry classification
//! - [`layout`] - Destination-path rules and well-known names
//! - [`sink`] - Copy-sink abstraction for staging artifacts
//! - [`bootstrap`] - Bootstrap descriptor builder and writer
//! - [`manifest`] - Declarative YAML configuration surface
//! - [`assembly`] - End-to-end distribution assembly
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stowage::{ClosureResolver, Configuration, ModuleId, ResolvedModule};
//!
//! let module = Arc::new(
//!     ResolvedModule::new("com.example", "foo", "1.0")
//!         .with_artifact("/repo/foo-1.0.jar"),
//! );
//! let runtime = Configuration::new("runtime").with_root(module);
//!
//! let mut resolver = ClosureResolver::new();
//! resolver.exclude(ModuleId::new(".*", "unwanted-.*"));
//! let entries = resolver.resolve(&[runtime])?;
//! # Ok::<(), stowage::StowageError>(())
//! ```

pub mod assembly;
pub mod bootstrap;
pub mod error;
pub mod graph;
pub mod layout;
pub mod manifest;
pub mod module_id;
pub mod resolver;
pub mod sink;

pub use assembly::{AssemblyReport, Distribution, staged_files};
pub use bootstrap::{BootstrapDescriptor, PathEntry};
pub use error::{Result, StowageError};
pub use graph::{Configuration, ResolvedModule};
pub use manifest::{BootstrapManifest, DistributionManifest, PathManifest};
pub use module_id::ModuleId;
pub use resolver::{ClosureResolver, DistributionEntry, InclusionState};
pub use sink::{CopySink, DirectorySink};
