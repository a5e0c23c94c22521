//! CLI command implementations

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use arbor_core::{
    AnalysisInput, ComponentRegistry, DependencyGraph, SignificancePolicy, cross_reference,
    diff_snapshots, unused_components,
};

/// Read analysis-layer output and build a cross-referenced registry.
fn load_registry(input: &PathBuf) -> anyhow::Result<ComponentRegistry> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("cannot read analysis input: {}", input.display()))?;
    let mut analysis: AnalysisInput =
        serde_json::from_str(&json).context("analysis input is not valid JSON")?;

    cross_reference(&mut analysis.components);

    let mut registry = ComponentRegistry::new();
    registry.add_components(analysis.components);
    registry.add_imports(analysis.imports);
    for info in analysis.bundle_info {
        registry.set_bundle_info(info);
    }
    for health in analysis.health {
        registry.set_health(health);
    }

    tracing::info!(
        "Loaded {} components, {} imports",
        registry.component_count(),
        registry.imports().len()
    );
    Ok(registry)
}

pub fn snapshot(
    root: PathBuf,
    input: PathBuf,
    commit: String,
    branch: String,
) -> anyhow::Result<()> {
    let registry = load_registry(&input)?;
    let snapshot = registry.create_snapshot(&commit, &branch);
    let path = arbor_core::save_snapshot(&root, &snapshot)?;

    tracing::info!("Snapshot {} written to {}", snapshot.id, path.display());
    println!("{}", path.display());
    Ok(())
}

pub fn diff(
    base: PathBuf,
    head: PathBuf,
    gzip_threshold: Option<i64>,
    health_threshold: Option<f64>,
) -> anyhow::Result<()> {
    let base_snapshot = arbor_core::load_snapshot_file(&base)
        .with_context(|| format!("cannot load base snapshot: {}", base.display()))?;
    let head_snapshot = arbor_core::load_snapshot_file(&head)
        .with_context(|| format!("cannot load head snapshot: {}", head.display()))?;

    let mut policy = SignificancePolicy::default();
    if let Some(bytes) = gzip_threshold {
        policy.gzip_delta_bytes = bytes;
    }
    if let Some(points) = health_threshold {
        policy.health_delta_points = points;
    }

    let diff = diff_snapshots(&base_snapshot, &head_snapshot);
    tracing::info!(
        "Diff {} -> {}: {} added, {} removed, {} modified, significant: {}",
        diff.base,
        diff.head,
        diff.components.added.len(),
        diff.components.removed.len(),
        diff.components.modified.len(),
        diff.is_significant(&policy)
    );

    print!("{}", arbor_report::render_markdown(&diff, &policy));
    Ok(())
}

pub fn cycles(input: PathBuf) -> anyhow::Result<()> {
    let registry = load_registry(&input)?;
    let graph = DependencyGraph::from_imports(registry.imports());

    let cycles = graph.detect_cycles();
    if cycles.is_empty() {
        println!("No circular imports.");
        return Ok(());
    }
    for cycle in &cycles {
        println!("{}", cycle.join(" -> "));
    }
    tracing::warn!("{} circular import(s) found", cycles.len());
    Ok(())
}

pub fn impact(input: PathBuf, module: String) -> anyhow::Result<()> {
    let registry = load_registry(&input)?;
    let graph = DependencyGraph::from_imports(registry.imports());

    if !graph.contains(&module) {
        tracing::warn!("Module '{}' not present in the import graph", module);
        return Ok(());
    }

    let mut impacted: Vec<String> = graph.impacted_modules(&module).into_iter().collect();
    impacted.sort();
    tracing::info!("{} module(s) impacted by {}", impacted.len(), module);
    for module in impacted {
        println!("{module}");
    }
    Ok(())
}

pub fn unused(input: PathBuf) -> anyhow::Result<()> {
    let registry = load_registry(&input)?;
    for component in unused_components(&registry) {
        println!("{} ({})", component.name, component.file_path);
    }
    Ok(())
}

pub fn clear(root: PathBuf) -> anyhow::Result<()> {
    arbor_core::clear_snapshots(&root)?;
    tracing::info!("Snapshots cleared for: {}", root.display());
    Ok(())
}
