//! Liveness analysis over consumer chains

use std::collections::{HashSet, VecDeque};

use crate::model::ComponentInfo;
use crate::registry::ComponentRegistry;

/// Whether `id` is rendered, directly or transitively, by a root
/// component. The walk goes upward through `used_by` over components
/// that actually exist (dangling ids are skipped) and is bounded by an
/// explicit visited set, so cyclic usage graphs terminate: a cycle
/// island detached from every root is not used.
pub fn is_component_used(registry: &ComponentRegistry, id: &str) -> bool {
    let Some(component) = registry.get_component(id) else {
        return false;
    };

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&ComponentInfo> = VecDeque::new();
    visited.insert(component.id.as_str());

    for consumer in registry.consumers(id) {
        if visited.insert(consumer.id.as_str()) {
            queue.push_back(consumer);
        }
    }

    while let Some(current) = queue.pop_front() {
        let consumers = registry.consumers(&current.id);
        if consumers.is_empty() {
            // Chain terminated at a root: something reachable from an
            // entry point renders this component.
            return true;
        }
        for consumer in consumers {
            if visited.insert(consumer.id.as_str()) {
                queue.push_back(consumer);
            }
        }
    }

    false
}

/// Components no consumer chain connects to a root. Entry-point roots
/// themselves have no consumers and appear here too; callers filter
/// known entries.
pub fn unused_components(registry: &ComponentRegistry) -> Vec<&ComponentInfo> {
    registry
        .components()
        .filter(|c| !is_component_used(registry, &c.id))
        .collect()
}
