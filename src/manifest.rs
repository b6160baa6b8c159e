//! Declarative distribution manifest
//!
//! A YAML document that declares filter rules and bootstrap settings, so a
//! host build can configure a distribution without code:
//!
//! ```yaml
//! include:
//!   - "com\\.example:.*"
//! exclude:
//!   - ".*:unwanted-.*"
//! bootstrap:
//!   module: app
//!   class: com.example.Main
//!   paths:
//!     - path: lib
//!       max-depth: 3
//!   properties:
//!     env: prod
//! ```
//!
//! Rule declaration order follows the document: include rules first, then
//! exclude rules, each in list order — declaration order is what drives
//! first-match-wins precedence in the resolver.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bootstrap::BootstrapDescriptor;
use crate::error::{Result, StowageError};
use crate::module_id::ModuleId;
use crate::resolver::ClosureResolver;

/// Distribution manifest from a YAML document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionManifest {
    /// Coordinate patterns to include
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Coordinate patterns to exclude
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Bootstrap descriptor settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<BootstrapManifest>,
}

/// Bootstrap section of the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapManifest {
    /// Launcher module name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Launcher class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Ordered search-path entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<PathManifest>,

    /// Launcher properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

/// One search-path entry in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathManifest {
    pub path: String,

    #[serde(rename = "min-depth", default, skip_serializing_if = "Option::is_none")]
    pub min_depth: Option<u32>,

    #[serde(rename = "max-depth", default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

impl DistributionManifest {
    /// Parse a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize the manifest to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(yaml)
    }

    /// Load a manifest from a file
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` when the file does not exist and
    /// `ManifestReadFailed`/`ManifestParseFailed` on read or parse failures.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StowageError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| StowageError::ManifestReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let manifest: Self =
            serde_yaml::from_str(&content).map_err(|e| StowageError::ManifestParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the coordinate shape of every declared pattern
    ///
    /// The regular expressions themselves compile lazily at match time; only
    /// the `group:name[:version]` segmentation is checked here.
    pub fn validate(&self) -> Result<()> {
        for pattern in self.include.iter().chain(&self.exclude) {
            ModuleId::parse(pattern)?;
        }
        Ok(())
    }

    /// Declare the manifest's rules and bootstrap settings
    ///
    /// Include rules are declared before exclude rules, each list in
    /// document order.
    pub fn apply(
        &self,
        resolver: &mut ClosureResolver,
        descriptor: &mut BootstrapDescriptor,
    ) -> Result<()> {
        for pattern in &self.include {
            resolver.include(ModuleId::parse(pattern)?);
        }
        for pattern in &self.exclude {
            resolver.exclude(ModuleId::parse(pattern)?);
        }

        if let Some(bootstrap) = &self.bootstrap {
            if let Some(module) = &bootstrap.module {
                descriptor.set_module_name(module);
            }
            if let Some(class) = &bootstrap.class {
                descriptor.set_class_name(class);
            }
            for path in &bootstrap.paths {
                let entry = descriptor.add_path(&path.path);
                if let Some(depth) = path.min_depth {
                    entry.set_min_depth(depth);
                }
                if let Some(depth) = path.max_depth {
                    entry.set_max_depth(depth);
                }
            }
            for (key, value) in &bootstrap.properties {
                descriptor.set_property(key, value);
            }
        }
        Ok(())
    }
}
