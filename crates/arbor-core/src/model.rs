//! Core data structures for the component graph

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable component identifier, canonically `filePath#name`.
///
/// Kept as a plain string alias: before cross-referencing, `children`
/// legally holds unresolved names in the same slots where resolved ids
/// land afterwards.
pub type ComponentId = String;

/// Build the canonical id for a component detected at `file_path`.
pub fn component_id(file_path: &str, name: &str) -> ComponentId {
    format!("{file_path}#{name}")
}

/// UI framework a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    React,
    Vue,
    Svelte,
    Angular,
    Solid,
    Preact,
    Unknown,
}

impl Framework {
    /// Guess the framework from a source file extension. JSX/TSX files
    /// default to React; callers with better signals override.
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit('.').next().unwrap_or("");
        match ext {
            "vue" => Framework::Vue,
            "svelte" => Framework::Svelte,
            "jsx" | "tsx" => Framework::React,
            _ => Framework::Unknown,
        }
    }
}

/// How a component is exported from its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportKind {
    Default,
    Named,
    Both,
    None,
}

/// A single prop on a component, unique by name within that component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A detected UI component and its structural relationships.
///
/// `children` holds forward edges; `used_by` the inverse. The analysis
/// layer emits `children` keyed by name, and cross-referencing rewrites
/// them to ids while populating `used_by`. After that pass the invariant
/// holds: `B.id ∈ A.children ⟺ A.id ∈ B.used_by`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub id: ComponentId,
    pub name: String,
    pub file_path: String,
    pub line: u32,
    pub framework: Framework,
    pub export_kind: ExportKind,
    #[serde(default)]
    pub props: Vec<PropInfo>,
    /// Child references: resolved ids, or names pending cross-reference.
    #[serde(default)]
    pub children: Vec<String>,
    /// Ids of components that render this one.
    #[serde(default)]
    pub used_by: Vec<ComponentId>,
    /// Package specifiers this component's module imports.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// One import statement recorded by the analysis layer.
///
/// `target` is either a relative file path or a bare package specifier;
/// the dependency graph treats both as opaque node identifiers. Edges are
/// not deduplicated: two imports of the same target from the same file
/// are both recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub specifiers: Vec<String>,
    #[serde(default)]
    pub type_only: bool,
}

/// Raw and gzip byte sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePair {
    pub raw: u64,
    pub gzip: u64,
}

/// Bundle measurements for one component, keyed 1:1 by component id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentBundleInfo {
    pub component_id: ComponentId,
    pub self_size: SizePair,
    /// Size reachable only from this component among its siblings.
    pub exclusive_size: SizePair,
    pub total_size: SizePair,
    #[serde(default)]
    pub chunks: Vec<String>,
}

/// Health score for one component, keyed 1:1 by component id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub component_id: ComponentId,
    pub score: f64,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    pub computed_at: DateTime<Utc>,
}

/// Immutable point-in-time capture of the whole registry.
///
/// Owns copies of every collection — no aliasing with live registry
/// state. Plain JSON-serializable record suitable for file storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub id: String,
    pub commit_sha: String,
    pub branch: String,
    pub created_at: DateTime<Utc>,
    pub components: Vec<ComponentInfo>,
    pub imports: Vec<ImportEdge>,
    pub bundle_info: Vec<ComponentBundleInfo>,
    pub health: Vec<ComponentHealth>,
}

/// The input contract from the analysis layer: one run's worth of
/// detected components, imports, and optional bundle/health producer
/// output. Components arrive with name-keyed `children`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    #[serde(default)]
    pub components: Vec<ComponentInfo>,
    #[serde(default)]
    pub imports: Vec<ImportEdge>,
    #[serde(default)]
    pub bundle_info: Vec<ComponentBundleInfo>,
    #[serde(default)]
    pub health: Vec<ComponentHealth>,
}

/// Per-component detail inside a snapshot diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentChange {
    pub component_id: ComponentId,
    pub props_added: Vec<String>,
    pub props_removed: Vec<String>,
    /// Prop names present in both snapshots whose type or requiredness
    /// changed.
    pub props_modified: Vec<String>,
    /// Coarse textual notes on children/dependency counts and framework.
    pub changes: Vec<String>,
}

/// Component-level additions, removals, and modifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentChanges {
    pub added: Vec<ComponentInfo>,
    pub removed: Vec<ComponentInfo>,
    pub modified: Vec<ComponentChange>,
}

/// Signed byte delta between two size pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDelta {
    pub raw: i64,
    pub gzip: i64,
}

/// Self-size change for a component with bundle info in both snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDelta {
    pub component_id: ComponentId,
    pub before: SizePair,
    pub after: SizePair,
    pub delta: SizeDelta,
}

/// Score change for a component with health in both snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDelta {
    pub component_id: ComponentId,
    pub before: f64,
    pub after: f64,
    pub delta: f64,
}

/// Structured delta between two snapshots. Derived and ephemeral —
/// computed on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDiff {
    /// Id of the base snapshot.
    pub base: String,
    /// Id of the head snapshot.
    pub head: String,
    pub components: ComponentChanges,
    pub bundle_diff: Vec<BundleDelta>,
    pub health_diff: Vec<HealthDelta>,
}

impl SnapshotDiff {
    /// True when no component was added, removed, or modified.
    pub fn has_no_component_changes(&self) -> bool {
        self.components.added.is_empty()
            && self.components.removed.is_empty()
            && self.components.modified.is_empty()
    }
}
