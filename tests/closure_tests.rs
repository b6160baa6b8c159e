//! Closure-resolution behavior across the public API

mod common;

use std::sync::Arc;

use stowage::{ClosureResolver, Configuration, ModuleId, ResolvedModule, StowageError};

fn names(entries: &[stowage::DistributionEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| entry.module().map(|module| module.name.clone()))
        .collect()
}

#[test]
fn test_transitive_children_are_classified() {
    let repo = common::TestRepo::new();
    let grandchild = repo.module("com.example", "grandchild", "1.0");
    let child = Arc::new(
        ResolvedModule::new("com.example", "child", "1.0").with_child(grandchild),
    );
    let root = Arc::new(ResolvedModule::new("com.example", "root", "1.0").with_child(child));
    let runtime = Configuration::new("runtime").with_root(root);

    let mut resolver = ClosureResolver::new();
    let entries = resolver.resolve(&[runtime]).unwrap();
    assert_eq!(names(&entries), vec!["root", "child", "grandchild"]);
}

#[test]
fn test_exclude_applies_to_transitive_children() {
    let repo = common::TestRepo::new();
    let noisy = repo.module("org.thirdparty", "noisy-logger", "2.1");
    let root = Arc::new(ResolvedModule::new("com.example", "root", "1.0").with_child(noisy));
    let runtime = Configuration::new("runtime").with_root(root);

    let mut resolver = ClosureResolver::new();
    resolver.exclude(ModuleId::new("org\\.thirdparty", "noisy-.*"));
    let entries = resolver.resolve(&[runtime]).unwrap();
    assert_eq!(names(&entries), vec!["root"]);
}

#[test]
fn test_limited_include_spans_configurations() {
    let repo = common::TestRepo::new();
    let wanted = repo.module("com.example", "wanted", "1.0");
    let stray = repo.module("org.other", "stray", "1.0");
    let runtime = Configuration::new("runtime").with_root(wanted);
    let extra = Configuration::new("extra").with_root(stray);

    let mut resolver = ClosureResolver::new();
    resolver.include(ModuleId::new("com\\.example", ".*"));
    let entries = resolver.resolve(&[runtime, extra]).unwrap();
    assert!(resolver.limited_include());
    assert_eq!(names(&entries), vec!["wanted"]);
}

#[test]
fn test_include_then_exclude_of_same_pattern_excludes() {
    let repo = common::TestRepo::new();
    let module = repo.module("com.example", "foo", "1.0");
    let runtime = Configuration::new("runtime").with_root(module);

    let pattern = ModuleId::new("com\\.example", "foo");
    let mut resolver = ClosureResolver::new();
    resolver.include(pattern.clone()).exclude(pattern);

    // One entry, final state excluded; with no remaining include rule the
    // resolver stays out of limited-include mode, so nothing else is dropped.
    let entries = resolver.resolve(&[runtime]).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_broad_include_before_narrow_exclude() {
    let repo = common::TestRepo::new();
    let module = repo.module("com.example", "foo", "1.0");
    let runtime = Configuration::new("runtime").with_root(Arc::clone(&module));

    let mut resolver = ClosureResolver::new();
    resolver
        .include(ModuleId::new("com\\.example", ".*"))
        .exclude(ModuleId::new("com\\.example", "foo"));
    let entries = resolver.resolve(&[runtime.clone()]).unwrap();
    assert_eq!(names(&entries), vec!["foo"]);

    // Reversed declaration order: the narrow exclude is scanned first and wins.
    let mut reversed = ClosureResolver::new();
    reversed
        .exclude(ModuleId::new("com\\.example", "foo"))
        .include(ModuleId::new("com\\.example", ".*"));
    let entries = reversed.resolve(&[runtime]).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_malformed_pattern_surfaces_at_resolve_time() {
    let repo = common::TestRepo::new();
    let module = repo.module("com.example", "foo", "1.0");
    let runtime = Configuration::new("runtime").with_root(module);

    let mut resolver = ClosureResolver::new();
    // Declaration itself does not compile the pattern
    resolver.include(ModuleId::new("(?P<broken", ".*"));

    let result = resolver.resolve(&[runtime]);
    assert!(matches!(
        result.unwrap_err(),
        StowageError::InvalidPattern { .. }
    ));
}
