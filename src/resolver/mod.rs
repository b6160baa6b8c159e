//! Dependency-closure resolution
//!
//! This module handles:
//! - Registering include/exclude/configure rules against module patterns
//! - Walking each configuration's dependency forest depth-first
//! - Classifying every reachable module through the rule table
//! - Deduplicating the resulting set of distribution entries
//!
//! ## Precedence
//!
//! Rules are scanned in declaration order and the first satisfied entry wins
//! outright; there is no most-specific-match tie-break. Declaring any include
//! rule switches the resolver into limited-include mode: an allow-list regime
//! where modules matching no rule are dropped instead of auto-included.

pub mod entry;

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet, map::Entry};

use crate::error::Result;
use crate::graph::{Configuration, ResolvedModule};
use crate::module_id::ModuleId;

pub use entry::{DistributionEntry, InclusionState};

/// Computes the exact set of artifacts to place in the output
///
/// The rule table preserves declaration order; a pattern declared twice
/// reuses its entry, so configuration accumulates and the last flag mutation
/// wins.
#[derive(Debug, Default)]
pub struct ClosureResolver {
    entries: IndexMap<ModuleId, DistributionEntry>,
    limited_include: bool,
}

impl ClosureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an include rule for the given pattern
    pub fn include(&mut self, pattern: ModuleId) -> &mut Self {
        self.entry(pattern).include();
        self
    }

    /// Declare an exclude rule for the given pattern
    pub fn exclude(&mut self, pattern: ModuleId) -> &mut Self {
        self.entry(pattern).exclude();
        self
    }

    /// Locate or create the entry for a pattern and apply a caller mutation
    pub fn configure(
        &mut self,
        pattern: ModuleId,
        mutator: impl FnOnce(&mut DistributionEntry),
    ) -> &mut Self {
        mutator(self.entry(pattern));
        self
    }

    /// Whether the last `resolve` ran in allow-list mode
    pub fn limited_include(&self) -> bool {
        self.limited_include
    }

    fn entry(&mut self, pattern: ModuleId) -> &mut DistributionEntry {
        match self.entries.entry(pattern) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let pattern = vacant.key().clone();
                vacant.insert(DistributionEntry::pattern(pattern))
            }
        }
    }

    /// Resolve the dependency closure of the given configurations
    ///
    /// Walks each configuration's forest depth-first, classifies every
    /// reachable module against the rule table, and returns the deduplicated
    /// included entries in match order. An entry reachable under several
    /// configurations or parents appears once.
    ///
    /// # Errors
    ///
    /// A malformed match pattern aborts the whole pass with `InvalidPattern`;
    /// patterns are compiled lazily, so this is the first point a bad pattern
    /// surfaces.
    pub fn resolve(&mut self, configurations: &[Configuration]) -> Result<Vec<DistributionEntry>> {
        self.limited_include = self
            .entries
            .values()
            .any(|entry| entry.is_pattern() && entry.state() == InclusionState::Included);

        let mut visited = HashSet::new();
        let mut matched = IndexSet::new();
        for configuration in configurations {
            for root in &configuration.roots {
                self.walk(root, &mut visited, &mut matched)?;
            }
        }

        Ok(matched
            .iter()
            .filter_map(|key| self.entries.get(key))
            .cloned()
            .collect())
    }

    /// Expand one module and its children, each at most once per pass
    ///
    /// The visited set is keyed by coordinates, which also keeps a cyclic
    /// input graph from looping forever.
    fn walk(
        &mut self,
        module: &Arc<ResolvedModule>,
        visited: &mut HashSet<ModuleId>,
        matched: &mut IndexSet<ModuleId>,
    ) -> Result<()> {
        if !visited.insert(module.id()) {
            return Ok(());
        }
        self.classify(module, matched)?;
        for child in &module.children {
            self.walk(child, visited, matched)?;
        }
        Ok(())
    }

    /// Classify one module through the rule table
    ///
    /// Outside limited-include mode every module is guaranteed a
    /// classification: one that matches no declared rule gets a lazily
    /// created auto-included entry keyed by its coordinates. The scan takes
    /// at most one entry, in declaration order, and binds it on first match.
    fn classify(
        &mut self,
        module: &Arc<ResolvedModule>,
        matched: &mut IndexSet<ModuleId>,
    ) -> Result<()> {
        if !self.limited_include {
            let key = module.id();
            if !self.entries.contains_key(&key) {
                self.entries
                    .insert(key, DistributionEntry::instance(Arc::clone(module)));
            }
        }

        let mut first_match = None;
        for (index, entry) in self.entries.values().enumerate() {
            if entry.satisfied_by(module)? {
                first_match = Some(index);
                break;
            }
        }

        if let Some(index) = first_match {
            if let Some((key, entry)) = self.entries.get_index_mut(index) {
                entry.bind(Arc::clone(module));
                if entry.included() {
                    matched.insert(key.clone());
                }
            }
        }
        Ok(())
    }
}
