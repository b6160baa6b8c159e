//! Bootstrap descriptor builder and writer
//!
//! Accumulates the launcher module/class names, ordered search-path entries
//! and key/value properties, then serializes them as an XML document:
//!
//! ```text
//! <application module="..." class="...">
//!   <path max-depth="N" min-depth="N">relative/path</path>
//!   <property key="...">value</property>
//! </application>
//! ```
//!
//! The descriptor is incomplete until both module and class names are set;
//! writing an incomplete descriptor is a no-op that reports `false`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, StowageError};

const APPLICATION_ELEMENT: &str = "application";
const MODULE_ATTRIBUTE: &str = "module";
const CLASS_ATTRIBUTE: &str = "class";
const PATH_ELEMENT: &str = "path";
const PATH_MAX_DEPTH_ATTRIBUTE: &str = "max-depth";
const PATH_MIN_DEPTH_ATTRIBUTE: &str = "min-depth";
const PROPERTY_ELEMENT: &str = "property";
const PROPERTY_KEY_ATTRIBUTE: &str = "key";

/// One classpath search-path entry with optional depth bounds
///
/// Depth bounds are opaque metadata interpreted by the launcher; no
/// cross-validation (such as min against max) happens here.
#[derive(Debug, Clone)]
pub struct PathEntry {
    name: String,
    min_depth: Option<u32>,
    max_depth: Option<u32>,
}

impl PathEntry {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_depth: None,
            max_depth: None,
        }
    }

    pub fn set_min_depth(&mut self, depth: u32) -> &mut Self {
        self.min_depth = Some(depth);
        self
    }

    pub fn set_max_depth(&mut self, depth: u32) -> &mut Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_depth(&self) -> Option<u32> {
        self.min_depth
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }
}

/// Accumulates launcher configuration and writes it as a descriptor file
///
/// Accumulation is never reset: a descriptor can be written more than once
/// and produces byte-identical output for identical state.
#[derive(Debug, Clone, Default)]
pub struct BootstrapDescriptor {
    module_name: Option<String>,
    class_name: Option<String>,
    paths: Vec<PathEntry>,
    properties: BTreeMap<String, String>,
}

impl BootstrapDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the launcher module name; no validation at set time
    pub fn set_module_name(&mut self, module_name: impl Into<String>) -> &mut Self {
        self.module_name = Some(module_name.into());
        self
    }

    /// Set the launcher class name; no validation at set time
    pub fn set_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Append a search-path entry, returned for depth configuration
    pub fn add_path(&mut self, name: impl Into<String>) -> &mut PathEntry {
        self.paths.push(PathEntry::new(name));
        let last = self.paths.len() - 1;
        &mut self.paths[last]
    }

    /// Upsert a property; last write wins for duplicate keys
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn paths(&self) -> &[PathEntry] {
        &self.paths
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Whether both required names are present
    pub fn is_complete(&self) -> bool {
        self.module_name.is_some() && self.class_name.is_some()
    }

    /// Write the descriptor to the given file
    ///
    /// Returns `Ok(false)` without touching the filesystem when the
    /// descriptor is incomplete. Otherwise the document is rendered fully in
    /// memory, any existing file is removed, and the bytes are written in one
    /// operation, so no partial file is ever left behind.
    ///
    /// # Errors
    ///
    /// Serialization and I/O failures are reported as
    /// `DescriptorWriteFailed`.
    pub fn write(&self, path: &Path) -> Result<bool> {
        let (Some(module_name), Some(class_name)) = (&self.module_name, &self.class_name) else {
            return Ok(false);
        };

        let bytes = self.render(module_name, class_name, path)?;

        if path.exists() {
            fs::remove_file(path).map_err(|e| write_failed(path, &e))?;
        }
        fs::write(path, bytes).map_err(|e| write_failed(path, &e))?;
        Ok(true)
    }

    fn render(&self, module_name: &str, class_name: &str, path: &Path) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))
            .map_err(|e| write_failed(path, &e))?;

        let mut application = BytesStart::new(APPLICATION_ELEMENT);
        application.push_attribute((MODULE_ATTRIBUTE, module_name));
        application.push_attribute((CLASS_ATTRIBUTE, class_name));
        writer
            .write_event(Event::Start(application))
            .map_err(|e| write_failed(path, &e))?;

        for entry in &self.paths {
            let mut element = BytesStart::new(PATH_ELEMENT);
            if let Some(depth) = entry.max_depth {
                element.push_attribute((PATH_MAX_DEPTH_ATTRIBUTE, depth.to_string().as_str()));
            }
            if let Some(depth) = entry.min_depth {
                element.push_attribute((PATH_MIN_DEPTH_ATTRIBUTE, depth.to_string().as_str()));
            }
            writer
                .write_event(Event::Start(element))
                .map_err(|e| write_failed(path, &e))?;
            writer
                .write_event(Event::Text(BytesText::new(&entry.name)))
                .map_err(|e| write_failed(path, &e))?;
            writer
                .write_event(Event::End(BytesEnd::new(PATH_ELEMENT)))
                .map_err(|e| write_failed(path, &e))?;
        }

        for (key, value) in &self.properties {
            let mut element = BytesStart::new(PROPERTY_ELEMENT);
            element.push_attribute((PROPERTY_KEY_ATTRIBUTE, key.as_str()));
            writer
                .write_event(Event::Start(element))
                .map_err(|e| write_failed(path, &e))?;
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .map_err(|e| write_failed(path, &e))?;
            writer
                .write_event(Event::End(BytesEnd::new(PROPERTY_ELEMENT)))
                .map_err(|e| write_failed(path, &e))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(APPLICATION_ELEMENT)))
            .map_err(|e| write_failed(path, &e))?;

        Ok(writer.into_inner())
    }
}

fn write_failed(path: &Path, reason: &impl fmt::Display) -> StowageError {
    StowageError::DescriptorWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
