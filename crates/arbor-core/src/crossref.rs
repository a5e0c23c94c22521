//! Cross-referencing: name-keyed child references → bidirectional id edges
//!
//! Per-file analysis cannot know another file's component id at detection
//! time, so components arrive with `children` keyed by name. This module
//! is the linker: pass 1 populates inverse `used_by` edges through a name
//! index, pass 2 rewrites `children` names to resolved ids.

use std::collections::HashMap;

use crate::model::{ComponentId, ComponentInfo};
use crate::registry::ComponentRegistry;

/// Index from component name to component id, built once over the full
/// component list. First occurrence wins on a name collision — two
/// differently-located components sharing a name are indistinguishable
/// here, a known correctness risk of name-based matching.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_name: HashMap<String, ComponentId>,
}

impl NameIndex {
    pub fn build<'a>(components: impl IntoIterator<Item = &'a ComponentInfo>) -> Self {
        let mut by_name: HashMap<String, ComponentId> = HashMap::new();
        for component in components {
            if let Some(existing) = by_name.get(&component.name) {
                tracing::warn!(
                    "Component name collision: '{}' maps to {}, ignoring {}",
                    component.name,
                    existing,
                    component.id
                );
            } else {
                by_name.insert(component.name.clone(), component.id.clone());
            }
        }
        NameIndex { by_name }
    }

    pub fn resolve(&self, name: &str) -> Option<&ComponentId> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Resolve name-based `children` into stable ids and populate inverse
/// `used_by` edges, in place.
///
/// Idempotent: `used_by` appends are deduplicated by value, and already
/// resolved ids in `children` match no name in the index, so a second
/// run falls through without changes.
pub fn cross_reference(components: &mut [ComponentInfo]) {
    let index = NameIndex::build(components.iter());

    let position: HashMap<ComponentId, usize> = components
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    // Pass 1: for every resolvable child reference, record the consumer
    // on the target's used_by.
    let mut back_edges: Vec<(usize, ComponentId)> = Vec::new();
    for component in components.iter() {
        for child in &component.children {
            if let Some(target_id) = index.resolve(child) {
                if let Some(&target_pos) = position.get(target_id) {
                    back_edges.push((target_pos, component.id.clone()));
                }
            }
        }
    }
    for (target_pos, consumer_id) in back_edges {
        let used_by = &mut components[target_pos].used_by;
        if !used_by.contains(&consumer_id) {
            used_by.push(consumer_id);
        }
    }

    // Pass 2: rewrite children through the index. Unresolved names
    // (native tags, externally-defined components) fall through
    // unchanged; empty entries are dropped.
    for component in components.iter_mut() {
        let children = std::mem::take(&mut component.children);
        component.children = children
            .into_iter()
            .filter(|child| !child.is_empty())
            .map(|child| match index.resolve(&child) {
                Some(id) => id.clone(),
                None => child,
            })
            .collect();
    }
}

impl ComponentRegistry {
    /// Run cross-referencing over every stored component.
    pub fn cross_reference(&mut self) {
        let mut components: Vec<ComponentInfo> = self.components().cloned().collect();
        cross_reference(&mut components);
        for component in components {
            self.add_component(component);
        }
    }
}
