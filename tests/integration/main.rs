//! Integration tests for Arbor
//!
//! These tests verify that multiple systems work together correctly:
//! analysis ingestion → cross-referencing → registry → snapshot store →
//! diff → report.

use std::collections::HashMap;

use arbor_core::{
    ComponentInfo, ComponentRegistry, DependencyGraph, ExportKind, Framework, ImportEdge,
    SignificancePolicy, component_id, cross_reference, diff_snapshots, load_snapshot_file,
    save_snapshot,
};
use tempfile::TempDir;

fn component(file_path: &str, name: &str, children: &[&str]) -> ComponentInfo {
    ComponentInfo {
        id: component_id(file_path, name),
        name: name.to_string(),
        file_path: file_path.to_string(),
        line: 1,
        framework: Framework::React,
        export_kind: ExportKind::Default,
        props: Vec::new(),
        children: children.iter().map(|s| s.to_string()).collect(),
        used_by: Vec::new(),
        dependencies: Vec::new(),
        metadata: HashMap::new(),
    }
}

fn import(source: &str, target: &str) -> ImportEdge {
    ImportEdge {
        source: source.to_string(),
        target: target.to_string(),
        specifiers: Vec::new(),
        type_only: false,
    }
}

/// Full pipeline: name-keyed analysis output becomes a persisted
/// snapshot, a second run produces a diff, and the report reflects it.
#[test]
fn analysis_to_snapshot_to_diff_to_report() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    // First run: Page renders Button.
    let mut components = vec![
        component("src/Page.tsx", "Page", &["Button", "div"]),
        component("src/Button.tsx", "Button", &[]),
    ];
    cross_reference(&mut components);

    let mut registry = ComponentRegistry::new();
    registry.add_components(components);
    registry.add_import(import("src/Page.tsx", "./Button"));
    registry.add_import(import("src/Button.tsx", "react"));

    let base = registry.create_snapshot("aaaaaaaaaaaaaaaa", "main");
    let base_path = save_snapshot(root, &base).unwrap();

    // Second run: Card appears, Page renders it.
    let mut components = vec![
        component("src/Page.tsx", "Page", &["Button", "Card", "div"]),
        component("src/Button.tsx", "Button", &[]),
        component("src/Card.tsx", "Card", &[]),
    ];
    cross_reference(&mut components);

    let mut registry = ComponentRegistry::new();
    registry.add_components(components);
    let head = registry.create_snapshot("bbbbbbbbbbbbbbbb", "feature");
    let head_path = save_snapshot(root, &head).unwrap();

    // Reload both from disk and diff.
    let base = load_snapshot_file(&base_path).unwrap();
    let head = load_snapshot_file(&head_path).unwrap();
    let diff = diff_snapshots(&base, &head);

    assert_eq!(diff.components.added.len(), 1);
    assert_eq!(diff.components.added[0].name, "Card");
    assert!(diff.components.removed.is_empty());
    assert_eq!(diff.components.modified.len(), 1);
    assert_eq!(diff.components.modified[0].component_id, "src/Page.tsx#Page");

    let policy = SignificancePolicy::default();
    assert!(diff.is_significant(&policy));
    let report = arbor_report::render_markdown(&diff, &policy);
    assert!(report.contains("### Added (1)"));
    assert!(report.contains("`Card`"));
    assert!(report.contains("children count changed: 2 -> 3"));
}

/// The registry's relationship queries and the import graph agree on
/// the same analysis run.
#[test]
fn registry_and_import_graph_views() {
    let mut components = vec![
        component("src/App.tsx", "App", &["Page"]),
        component("src/Page.tsx", "Page", &["Button"]),
        component("src/Button.tsx", "Button", &[]),
    ];
    cross_reference(&mut components);

    let mut registry = ComponentRegistry::new();
    registry.add_components(components);

    let roots = registry.root_components();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].name, "App");
    assert_eq!(registry.subtree("src/App.tsx#App").len(), 3);

    let imports = vec![
        import("src/App.tsx", "src/Page.tsx"),
        import("src/Page.tsx", "src/Button.tsx"),
        import("src/Button.tsx", "react"),
    ];
    let graph = DependencyGraph::from_imports(&imports);

    assert!(graph.detect_cycles().is_empty());
    let order = graph.topological_sort().expect("import graph is acyclic");
    let pos = |m: &str| order.iter().position(|x| x == m).unwrap();
    assert!(pos("src/App.tsx") < pos("src/Page.tsx"));
    assert!(pos("src/Page.tsx") < pos("src/Button.tsx"));
    assert!(pos("src/Button.tsx") < pos("react"));

    let impacted = graph.impacted_modules("react");
    assert_eq!(impacted.len(), 3);
}

/// A snapshot loaded back into a registry restores the full state.
#[test]
fn snapshot_restores_registry_state() {
    let mut components = vec![
        component("src/Page.tsx", "Page", &["Button"]),
        component("src/Button.tsx", "Button", &[]),
    ];
    cross_reference(&mut components);

    let mut registry = ComponentRegistry::new();
    registry.add_components(components);
    registry.add_import(import("src/Page.tsx", "./Button"));
    let snapshot = registry.create_snapshot("cccccccccccccccc", "main");

    let mut restored = ComponentRegistry::new();
    restored.load_snapshot(snapshot);

    assert_eq!(restored.component_count(), 2);
    assert_eq!(restored.imports().len(), 1);
    let button = restored.get_component("src/Button.tsx#Button").unwrap();
    assert_eq!(button.used_by, vec!["src/Page.tsx#Page".to_string()]);
}
