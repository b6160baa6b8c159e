//! Distribution entries: the classification state attached to matched modules
//!
//! An entry is created either from a user-declared rule (a pattern entry) or
//! lazily for a module that matched no rule (an auto-included instance
//! entry). Entries are mutated only during a single resolution pass; after
//! the pass they are read-only.

use std::sync::Arc;

use crate::error::Result;
use crate::graph::ResolvedModule;
use crate::layout;
use crate::module_id::ModuleId;
use crate::sink::CopySink;

/// Inclusion classification of one entry
///
/// `Unset` behaves as included; an explicit `include()` or `exclude()` call
/// moves the entry to the corresponding state, last call wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionState {
    Unset,
    Included,
    Excluded,
}

/// How an entry decides whether a module satisfies it
#[derive(Debug, Clone)]
enum Matcher {
    /// Declared rule: pattern-match on group/name/version
    Pattern(ModuleId),
    /// Auto-included entry: matches exactly one graph node, by identity
    Instance(Arc<ResolvedModule>),
}

/// Classification state for one declared rule or one auto-included module
#[derive(Debug, Clone)]
pub struct DistributionEntry {
    matcher: Matcher,
    state: InclusionState,
    module: Option<Arc<ResolvedModule>>,
    target_dir: Option<String>,
}

impl DistributionEntry {
    /// Entry for a user-declared rule; unbound, state unset
    pub(crate) fn pattern(pattern: ModuleId) -> Self {
        Self {
            matcher: Matcher::Pattern(pattern),
            state: InclusionState::Unset,
            module: None,
            target_dir: None,
        }
    }

    /// Auto-included entry for one specific module; bound at creation
    pub(crate) fn instance(module: Arc<ResolvedModule>) -> Self {
        Self {
            matcher: Matcher::Instance(Arc::clone(&module)),
            state: InclusionState::Included,
            module: Some(module),
            target_dir: None,
        }
    }

    /// Mark the entry included
    pub fn include(&mut self) -> &mut Self {
        self.state = InclusionState::Included;
        self
    }

    /// Mark the entry excluded
    pub fn exclude(&mut self) -> &mut Self {
        self.state = InclusionState::Excluded;
        self
    }

    /// Override the directory the entry's artifacts are staged under
    ///
    /// The override is prepended to the computed layout path.
    pub fn set_target_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.target_dir = Some(dir.into());
        self
    }

    pub fn state(&self) -> InclusionState {
        self.state
    }

    /// Whether the entry belongs in the output: unset or explicitly included
    pub fn included(&self) -> bool {
        self.state != InclusionState::Excluded
    }

    /// The module this entry bound to, if any
    pub fn module(&self) -> Option<&Arc<ResolvedModule>> {
        self.module.as_ref()
    }

    pub(crate) fn is_pattern(&self) -> bool {
        matches!(self.matcher, Matcher::Pattern(_))
    }

    /// Whether the given module satisfies this entry's matcher
    pub(crate) fn satisfied_by(&self, module: &Arc<ResolvedModule>) -> Result<bool> {
        match &self.matcher {
            Matcher::Pattern(pattern) => {
                pattern.matches(&module.group, &module.name, &module.version)
            }
            Matcher::Instance(own) => Ok(Arc::ptr_eq(own, module)),
        }
    }

    /// Bind the entry to a module; first match wins, later binds are ignored
    pub(crate) fn bind(&mut self, module: Arc<ResolvedModule>) {
        if self.module.is_none() {
            self.module = Some(module);
        }
    }

    /// Hand every artifact of the bound module to the sink
    ///
    /// Destination paths come from the layout rule, prefixed with the
    /// target-directory override when one is set. No-op when unbound.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn stage_into(&self, sink: &mut dyn CopySink) -> Result<()> {
        let Some(module) = &self.module else {
            return Ok(());
        };
        for artifact in &module.artifacts {
            let path = layout::artifact_path(&module.group, &module.name, &module.version);
            let destination = match &self.target_dir {
                Some(dir) => format!("{dir}/{path}"),
                None => path,
            };
            sink.copy(artifact, &destination)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    struct RecordingSink {
        copies: Vec<(PathBuf, String)>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { copies: Vec::new() }
        }
    }

    impl CopySink for RecordingSink {
        fn copy(&mut self, source: &Path, destination: &str) -> Result<()> {
            self.copies
                .push((source.to_path_buf(), destination.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_unset_state_is_included() {
        let entry = DistributionEntry::pattern(ModuleId::new("g", "n"));
        assert_eq!(entry.state(), InclusionState::Unset);
        assert!(entry.included());
    }

    #[test]
    fn test_last_flag_call_wins() {
        let mut entry = DistributionEntry::pattern(ModuleId::new("g", "n"));
        entry.include();
        assert!(entry.included());
        entry.exclude();
        assert!(!entry.included());
        entry.include();
        assert!(entry.included());
    }

    #[test]
    fn test_instance_entry_matches_only_its_module() {
        let module = Arc::new(ResolvedModule::new("com.example", "foo", "1.0"));
        // Same coordinates, different node
        let twin = Arc::new(ResolvedModule::new("com.example", "foo", "1.0"));

        let entry = DistributionEntry::instance(Arc::clone(&module));
        assert!(entry.included());
        assert!(entry.satisfied_by(&module).unwrap());
        assert!(!entry.satisfied_by(&twin).unwrap());
    }

    #[test]
    fn test_first_bind_wins() {
        let first = Arc::new(ResolvedModule::new("com.example", "foo", "1.0"));
        let second = Arc::new(ResolvedModule::new("com.example", "foo", "2.0"));

        let mut entry = DistributionEntry::pattern(ModuleId::new("com\\.example", "foo"));
        entry.bind(Arc::clone(&first));
        entry.bind(second);
        assert!(Arc::ptr_eq(entry.module().unwrap(), &first));
    }

    #[test]
    fn test_stage_into_unbound_is_noop() {
        let entry = DistributionEntry::pattern(ModuleId::new("g", "n"));
        let mut sink = RecordingSink::new();
        entry.stage_into(&mut sink).unwrap();
        assert!(sink.copies.is_empty());
    }

    #[test]
    fn test_stage_into_uses_layout_rule() {
        let module = Arc::new(
            ResolvedModule::new("com.example", "foo", "2.3")
                .with_artifact("/repo/foo-2.3.jar")
                .with_artifact("/repo/foo-2.3-sources.jar"),
        );
        let mut entry = DistributionEntry::pattern(ModuleId::new("com\\.example", "foo"));
        entry.bind(module);

        let mut sink = RecordingSink::new();
        entry.stage_into(&mut sink).unwrap();
        assert_eq!(sink.copies.len(), 2);
        assert_eq!(sink.copies[0].1, "com/example/foo/2.3/foo-2.3.jar");
    }

    #[test]
    fn test_stage_into_honors_target_dir_override() {
        let module = Arc::new(
            ResolvedModule::new("com.example", "foo", "2.3").with_artifact("/repo/foo-2.3.jar"),
        );
        let mut entry = DistributionEntry::pattern(ModuleId::new("com\\.example", "foo"));
        entry.bind(module);
        entry.set_target_dir("ext");

        let mut sink = RecordingSink::new();
        entry.stage_into(&mut sink).unwrap();
        assert_eq!(sink.copies[0].1, "ext/com/example/foo/2.3/foo-2.3.jar");
    }
}
