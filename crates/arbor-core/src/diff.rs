//! Snapshot diff engine and CI significance policy

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::*;

/// Thresholds gating whether a diff warrants a CI comment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignificancePolicy {
    /// Gzip self-size delta (bytes, absolute) above which a bundle
    /// change is significant.
    pub gzip_delta_bytes: i64,
    /// Health score delta (points, absolute) above which a health
    /// change is significant.
    pub health_delta_points: f64,
}

impl Default for SignificancePolicy {
    fn default() -> Self {
        SignificancePolicy {
            gzip_delta_bytes: 1024,
            health_delta_points: 10.0,
        }
    }
}

impl SnapshotDiff {
    /// A diff is significant when any component was added, removed, or
    /// modified, or any bundle/health delta exceeds the policy
    /// thresholds. Thresholds are strict: a delta of exactly the
    /// configured value is not significant.
    pub fn is_significant(&self, policy: &SignificancePolicy) -> bool {
        if !self.has_no_component_changes() {
            return true;
        }
        if self
            .bundle_diff
            .iter()
            .any(|b| b.delta.gzip.abs() > policy.gzip_delta_bytes)
        {
            return true;
        }
        self.health_diff
            .iter()
            .any(|h| h.delta.abs() > policy.health_delta_points)
    }
}

/// Compute the structured delta between two snapshots. Pure and
/// stateless; `diff_snapshots(s, s)` yields empty component changes and
/// zero-valued deltas for every shared component.
pub fn diff_snapshots(base: &ProjectSnapshot, head: &ProjectSnapshot) -> SnapshotDiff {
    let base_components: HashMap<&str, &ComponentInfo> =
        base.components.iter().map(|c| (c.id.as_str(), c)).collect();
    let head_components: HashMap<&str, &ComponentInfo> =
        head.components.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut added: Vec<ComponentInfo> = head
        .components
        .iter()
        .filter(|c| !base_components.contains_key(c.id.as_str()))
        .cloned()
        .collect();
    added.sort_by(|a, b| a.id.cmp(&b.id));

    let mut removed: Vec<ComponentInfo> = base
        .components
        .iter()
        .filter(|c| !head_components.contains_key(c.id.as_str()))
        .cloned()
        .collect();
    removed.sort_by(|a, b| a.id.cmp(&b.id));

    let mut modified: Vec<ComponentChange> = Vec::new();
    for head_component in &head.components {
        let Some(base_component) = base_components.get(head_component.id.as_str()) else {
            continue;
        };
        if let Some(change) = compare_components(base_component, head_component) {
            modified.push(change);
        }
    }
    modified.sort_by(|a, b| a.component_id.cmp(&b.component_id));

    SnapshotDiff {
        base: base.id.clone(),
        head: head.id.clone(),
        components: ComponentChanges {
            added,
            removed,
            modified,
        },
        bundle_diff: bundle_diff(base, head),
        health_diff: health_diff(base, head),
    }
}

/// Per-component comparison. Returns `None` when nothing changed —
/// no-op comparisons are omitted from the diff entirely.
fn compare_components(base: &ComponentInfo, head: &ComponentInfo) -> Option<ComponentChange> {
    let base_props: HashMap<&str, &PropInfo> =
        base.props.iter().map(|p| (p.name.as_str(), p)).collect();
    let head_props: HashMap<&str, &PropInfo> =
        head.props.iter().map(|p| (p.name.as_str(), p)).collect();

    let mut props_added: Vec<String> = head
        .props
        .iter()
        .filter(|p| !base_props.contains_key(p.name.as_str()))
        .map(|p| p.name.clone())
        .collect();
    props_added.sort();

    let mut props_removed: Vec<String> = base
        .props
        .iter()
        .filter(|p| !head_props.contains_key(p.name.as_str()))
        .map(|p| p.name.clone())
        .collect();
    props_removed.sort();

    let mut props_modified: Vec<String> = head
        .props
        .iter()
        .filter_map(|head_prop| {
            let base_prop = base_props.get(head_prop.name.as_str())?;
            if base_prop.ty != head_prop.ty || base_prop.required != head_prop.required {
                Some(head_prop.name.clone())
            } else {
                None
            }
        })
        .collect();
    props_modified.sort();

    // Coarse count-based notes: reordering or same-count substitution
    // is invisible here by design.
    let mut changes: Vec<String> = Vec::new();
    if base.children.len() != head.children.len() {
        changes.push(format!(
            "children count changed: {} -> {}",
            base.children.len(),
            head.children.len()
        ));
    }
    if base.dependencies.len() != head.dependencies.len() {
        changes.push(format!(
            "dependencies count changed: {} -> {}",
            base.dependencies.len(),
            head.dependencies.len()
        ));
    }
    if base.framework != head.framework {
        changes.push(format!(
            "framework changed: {:?} -> {:?}",
            base.framework, head.framework
        ));
    }

    if props_added.is_empty()
        && props_removed.is_empty()
        && props_modified.is_empty()
        && changes.is_empty()
    {
        return None;
    }

    Some(ComponentChange {
        component_id: head.id.clone(),
        props_added,
        props_removed,
        props_modified,
        changes,
    })
}

/// Self-size deltas for components with bundle info in both snapshots.
/// Components measured in only one snapshot are omitted, not treated as
/// infinite deltas.
fn bundle_diff(base: &ProjectSnapshot, head: &ProjectSnapshot) -> Vec<BundleDelta> {
    let base_bundles: HashMap<&str, &ComponentBundleInfo> = base
        .bundle_info
        .iter()
        .map(|b| (b.component_id.as_str(), b))
        .collect();

    let mut deltas: Vec<BundleDelta> = head
        .bundle_info
        .iter()
        .filter_map(|after| {
            let before = base_bundles.get(after.component_id.as_str())?;
            Some(BundleDelta {
                component_id: after.component_id.clone(),
                before: before.self_size,
                after: after.self_size,
                delta: SizeDelta {
                    raw: after.self_size.raw as i64 - before.self_size.raw as i64,
                    gzip: after.self_size.gzip as i64 - before.self_size.gzip as i64,
                },
            })
        })
        .collect();
    deltas.sort_by(|a, b| a.component_id.cmp(&b.component_id));
    deltas
}

/// Score deltas for components with health in both snapshots.
fn health_diff(base: &ProjectSnapshot, head: &ProjectSnapshot) -> Vec<HealthDelta> {
    let base_health: HashMap<&str, &ComponentHealth> = base
        .health
        .iter()
        .map(|h| (h.component_id.as_str(), h))
        .collect();

    let mut deltas: Vec<HealthDelta> = head
        .health
        .iter()
        .filter_map(|after| {
            let before = base_health.get(after.component_id.as_str())?;
            Some(HealthDelta {
                component_id: after.component_id.clone(),
                before: before.score,
                after: after.score,
                delta: after.score - before.score,
            })
        })
        .collect();
    deltas.sort_by(|a, b| a.component_id.cmp(&b.component_id));
    deltas
}
