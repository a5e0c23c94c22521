//! Arbor Core — component registry, cross-referencing, dependency graph,
//! and snapshot diff engine

pub mod crossref;
pub mod depgraph;
pub mod diff;
pub mod error;
pub mod model;
pub mod registry;
pub mod store;
pub mod usage;


#[cfg(test)]
pub mod test_utils;

pub use crossref::{NameIndex, cross_reference};
pub use depgraph::DependencyGraph;
pub use diff::{SignificancePolicy, diff_snapshots};
pub use error::CoreError;
pub use model::{
    AnalysisInput, BundleDelta, ComponentBundleInfo, ComponentChange, ComponentChanges,
    ComponentHealth, ComponentId, ComponentInfo, ExportKind, Framework, HealthDelta, ImportEdge,
    ProjectSnapshot, PropInfo, SizeDelta, SizePair, SnapshotDiff, component_id,
};
pub use registry::ComponentRegistry;
pub use store::{
    clear_snapshots, ensure_snapshot_dir, list_snapshots, load_snapshot_file, save_snapshot,
    snapshot_dir,
};
pub use usage::{is_component_used, unused_components};
