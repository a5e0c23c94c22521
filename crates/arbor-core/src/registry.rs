//! In-memory component registry: authoritative store for one analysis run

use std::collections::{BTreeMap, HashSet, VecDeque};

use chrono::Utc;

use crate::model::*;

/// Owned, single-threaded store for components, import edges, bundle
/// measurements, and health scores. Rebuilt fully on each analysis run;
/// callers needing concurrent access wrap it externally.
///
/// Keyed collections use `BTreeMap` so iteration and snapshot capture
/// are deterministic across runs.
#[derive(Default)]
pub struct ComponentRegistry {
    components: BTreeMap<ComponentId, ComponentInfo>,
    imports: Vec<ImportEdge>,
    bundle_info: BTreeMap<ComponentId, ComponentBundleInfo>,
    health: BTreeMap<ComponentId, ComponentHealth>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("component_count", &self.components.len())
            .field("import_count", &self.imports.len())
            .finish()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Components ──────────────────────────────────────

    /// Upsert a component by id. Re-adding replaces the stored record.
    pub fn add_component(&mut self, component: ComponentInfo) {
        self.components.insert(component.id.clone(), component);
    }

    pub fn add_components(&mut self, components: Vec<ComponentInfo>) {
        for component in components {
            self.add_component(component);
        }
    }

    pub fn get_component(&self, id: &str) -> Option<&ComponentInfo> {
        self.components.get(id)
    }

    pub fn has_component(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Remove a component. Returns false when the id was absent.
    pub fn remove_component(&mut self, id: &str) -> bool {
        self.components.remove(id).is_some()
    }

    /// Iterate over all components in id order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.components.values()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ── Imports ─────────────────────────────────────────

    /// Append an import edge. Edges are not deduplicated.
    pub fn add_import(&mut self, import: ImportEdge) {
        self.imports.push(import);
    }

    pub fn add_imports(&mut self, imports: Vec<ImportEdge>) {
        self.imports.extend(imports);
    }

    pub fn imports(&self) -> &[ImportEdge] {
        &self.imports
    }

    /// Imports whose source exactly matches `file_path`. No path
    /// resolution is attempted.
    pub fn imports_from(&self, file_path: &str) -> Vec<&ImportEdge> {
        self.imports.iter().filter(|i| i.source == file_path).collect()
    }

    /// Imports whose target exactly matches `target`.
    pub fn imports_to(&self, target: &str) -> Vec<&ImportEdge> {
        self.imports.iter().filter(|i| i.target == target).collect()
    }

    // ── Bundle / health ─────────────────────────────────

    /// Upsert bundle measurements, keyed by component id; latest wins.
    /// The id is not validated against known components.
    pub fn set_bundle_info(&mut self, info: ComponentBundleInfo) {
        self.bundle_info.insert(info.component_id.clone(), info);
    }

    pub fn bundle_info(&self, id: &str) -> Option<&ComponentBundleInfo> {
        self.bundle_info.get(id)
    }

    /// Upsert a health record, keyed by component id; latest wins.
    pub fn set_health(&mut self, health: ComponentHealth) {
        self.health.insert(health.component_id.clone(), health);
    }

    pub fn health(&self, id: &str) -> Option<&ComponentHealth> {
        self.health.get(id)
    }

    // ── Relationship queries ────────────────────────────
    //
    // These operate purely on the resolved `children`/`used_by` arrays
    // stored on each component. Dangling ids are dropped at query time.

    /// Components that render `id`, resolved from its `used_by` list.
    pub fn consumers(&self, id: &str) -> Vec<&ComponentInfo> {
        match self.components.get(id) {
            Some(component) => component
                .used_by
                .iter()
                .filter_map(|consumer| self.components.get(consumer))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Components that `id` renders, resolved from its `children` list.
    pub fn dependents(&self, id: &str) -> Vec<&ComponentInfo> {
        match self.components.get(id) {
            Some(component) => component
                .children
                .iter()
                .filter_map(|child| self.components.get(child))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Components no other component renders.
    pub fn root_components(&self) -> Vec<&ComponentInfo> {
        self.components.values().filter(|c| c.used_by.is_empty()).collect()
    }

    /// Components that render nothing.
    pub fn leaf_components(&self) -> Vec<&ComponentInfo> {
        self.components.values().filter(|c| c.children.is_empty()).collect()
    }

    /// Breadth-first walk over `children` from `root_id`, root included.
    /// The visited set keeps cycles in `children` from looping; every
    /// reachable component appears exactly once.
    pub fn subtree(&self, root_id: &str) -> Vec<&ComponentInfo> {
        let Some(root) = self.components.get(root_id) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&ComponentInfo> = VecDeque::new();

        visited.insert(root.id.as_str());
        queue.push_back(root);

        while let Some(component) = queue.pop_front() {
            result.push(component);
            for child in &component.children {
                if let Some(child_component) = self.components.get(child) {
                    if visited.insert(child_component.id.as_str()) {
                        queue.push_back(child_component);
                    }
                }
            }
        }

        result
    }

    // ── Snapshots ───────────────────────────────────────

    /// Capture the whole registry as an immutable snapshot. All four
    /// collections are copied; the snapshot never aliases live state.
    pub fn create_snapshot(&self, commit_sha: &str, branch: &str) -> ProjectSnapshot {
        let now = Utc::now();
        let short_sha = commit_sha.get(..8).unwrap_or(commit_sha);
        let id = format!("snap_{}_{}", now.timestamp_millis(), short_sha);

        tracing::debug!(
            "Capturing snapshot {} ({} components, {} imports)",
            id,
            self.components.len(),
            self.imports.len()
        );

        ProjectSnapshot {
            id,
            commit_sha: commit_sha.to_string(),
            branch: branch.to_string(),
            created_at: now,
            components: self.components.values().cloned().collect(),
            imports: self.imports.clone(),
            bundle_info: self.bundle_info.values().cloned().collect(),
            health: self.health.values().cloned().collect(),
        }
    }

    /// Destructive restore: clears current state, then repopulates from
    /// the snapshot's arrays. No validation of the snapshot's contents
    /// is performed; a semantically malformed snapshot propagates as-is.
    pub fn load_snapshot(&mut self, snapshot: ProjectSnapshot) {
        self.clear();
        for component in snapshot.components {
            self.components.insert(component.id.clone(), component);
        }
        self.imports = snapshot.imports;
        for info in snapshot.bundle_info {
            self.bundle_info.insert(info.component_id.clone(), info);
        }
        for health in snapshot.health {
            self.health.insert(health.component_id.clone(), health);
        }
    }

    /// Empty all internal collections.
    pub fn clear(&mut self) {
        self.components.clear();
        self.imports.clear();
        self.bundle_info.clear();
        self.health.clear();
    }
}
