//! Builder helpers for registry and diff tests

use std::collections::HashMap;

use chrono::Utc;

use crate::model::*;

/// Build a minimal component with the canonical `filePath#name` id.
pub fn component(file_path: &str, name: &str) -> ComponentInfo {
    ComponentInfo {
        id: component_id(file_path, name),
        name: name.to_string(),
        file_path: file_path.to_string(),
        line: 1,
        framework: Framework::React,
        export_kind: ExportKind::Named,
        props: Vec::new(),
        children: Vec::new(),
        used_by: Vec::new(),
        dependencies: Vec::new(),
        metadata: HashMap::new(),
    }
}

/// Component with name-keyed child references, as the analysis layer
/// emits them before cross-referencing.
pub fn component_with_children(file_path: &str, name: &str, children: &[&str]) -> ComponentInfo {
    let mut c = component(file_path, name);
    c.children = children.iter().map(|s| s.to_string()).collect();
    c
}

pub fn prop(name: &str, ty: &str, required: bool) -> PropInfo {
    PropInfo {
        name: name.to_string(),
        ty: ty.to_string(),
        required,
        default_value: None,
        description: None,
    }
}

pub fn import(source: &str, target: &str) -> ImportEdge {
    ImportEdge {
        source: source.to_string(),
        target: target.to_string(),
        specifiers: Vec::new(),
        type_only: false,
    }
}

pub fn bundle(component_id: &str, raw: u64, gzip: u64) -> ComponentBundleInfo {
    ComponentBundleInfo {
        component_id: component_id.to_string(),
        self_size: SizePair { raw, gzip },
        exclusive_size: SizePair { raw, gzip },
        total_size: SizePair { raw, gzip },
        chunks: Vec::new(),
    }
}

pub fn health(component_id: &str, score: f64) -> ComponentHealth {
    ComponentHealth {
        component_id: component_id.to_string(),
        score,
        metrics: HashMap::new(),
        computed_at: Utc::now(),
    }
}

/// A snapshot wrapping the given components, with empty imports and no
/// bundle/health records.
pub fn snapshot(id: &str, components: Vec<ComponentInfo>) -> ProjectSnapshot {
    ProjectSnapshot {
        id: id.to_string(),
        commit_sha: "deadbeef".to_string(),
        branch: "main".to_string(),
        created_at: Utc::now(),
        components,
        imports: Vec::new(),
        bundle_info: Vec::new(),
        health: Vec::new(),
    }
}
