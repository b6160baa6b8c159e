//! Module coordinates and pattern matching
//!
//! A [`ModuleId`] is an immutable `group:name[:version]` triple. It serves two
//! roles:
//! - as the literal coordinates of a resolved module (version present), and
//! - as a match pattern in filter rules, where group, name and version are
//!   regular expressions and an absent version acts as a wildcard.

use std::fmt;

use regex::Regex;

use crate::error::{Result, StowageError};

/// An immutable (group, name, version) triple with pattern-matching semantics
///
/// Equality and hashing are structural over all three fields; an absent
/// version is never equal to a present one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    group: String,
    name: String,
    version: Option<String>,
}

impl ModuleId {
    /// Create an identifier with no version (wildcard when used as a pattern)
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Create an identifier with an explicit version
    pub fn with_version(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Parse coordinate notation: `group:name` or `group:name:version`
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the notation has the wrong number of
    /// segments or any segment is empty.
    pub fn parse(notation: &str) -> Result<Self> {
        let invalid = || StowageError::InvalidCoordinate {
            coordinate: notation.to_string(),
        };

        let parts: Vec<&str> = notation.split(':').collect();
        let id = match parts.as_slice() {
            [group, name] => ModuleId::new(*group, *name),
            [group, name, version] => ModuleId::with_version(*group, *name, *version),
            _ => return Err(invalid()),
        };

        if id.group.is_empty() || id.name.is_empty() || id.version.as_deref() == Some("") {
            return Err(invalid());
        }
        Ok(id)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Match candidate coordinates against this identifier as a pattern
    ///
    /// Group and name are treated as regular expressions anchored over the
    /// full candidate string. The version matches when this identifier has no
    /// version, or when the candidate version matches the version pattern.
    ///
    /// # Errors
    ///
    /// Patterns are compiled lazily; a malformed pattern surfaces here as
    /// `InvalidPattern`, not at construction time.
    pub fn matches(&self, group: &str, name: &str, version: &str) -> Result<bool> {
        if !full_match(&self.group, group)? {
            return Ok(false);
        }
        if !full_match(&self.name, name)? {
            return Ok(false);
        }
        match &self.version {
            None => Ok(true),
            Some(pattern) => full_match(pattern, version),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.name, version),
            None => write!(f, "{}:{}", self.group, self.name),
        }
    }
}

/// Match a regular expression over the full candidate string
fn full_match(pattern: &str, candidate: &str) -> Result<bool> {
    let regex =
        Regex::new(&format!("^(?:{pattern})$")).map_err(|e| StowageError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
    Ok(regex.is_match(candidate))
}
