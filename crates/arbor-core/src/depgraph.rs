//! Dependency graph over import edges, backed by petgraph::StableDiGraph
//!
//! Nodes are opaque module identifiers — relative file paths and bare
//! package specifiers are treated alike. Answers the structural questions
//! behind impact analysis and exclusive bundle-size attribution.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::model::ImportEdge;

/// Directed graph of module dependencies. Nodes are auto-created on
/// first reference; parallel edges collapse, so adjacency is
/// set-semantic in both directions.
pub struct DependencyGraph {
    inner: StableDiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from recorded imports. Duplicate import records
    /// produce a single edge.
    pub fn from_imports(imports: &[ImportEdge]) -> Self {
        let mut graph = Self::new();
        for import in imports {
            graph.add_edge(&import.source, &import.target);
        }
        graph
    }

    /// Intern a module id, creating its node on first reference.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.inner.add_node(id.to_string());
                self.index.insert(id.to_string(), idx);
                idx
            }
        }
    }

    /// Add a dependency edge `from → to`, creating both nodes as needed.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        if !self.inner.contains_edge(a, b) {
            self.inner.add_edge(a, b, ());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Direct dependencies of `id` (outgoing neighbors), sorted.
    pub fn dependencies(&self, id: &str) -> Vec<String> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Direct dependents of `id` (incoming neighbors), sorted.
    pub fn dependents(&self, id: &str) -> Vec<String> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut result: Vec<String> = self
            .inner
            .neighbors_directed(idx, direction)
            .filter_map(|n| self.inner.node_weight(n).cloned())
            .collect();
        result.sort();
        result
    }

    /// Everything reachable from `id` along outgoing edges, self
    /// excluded. Breadth-first with a visited set, so cycles terminate
    /// and recursion depth never tracks graph depth.
    pub fn transitive_dependencies(&self, id: &str) -> HashSet<String> {
        self.closure(id, Direction::Outgoing)
    }

    /// Everything that reaches `id` along incoming edges — the modules a
    /// change to `id` can impact. Self excluded.
    pub fn impacted_modules(&self, id: &str) -> HashSet<String> {
        self.closure(id, Direction::Incoming)
    }

    fn closure(&self, id: &str, direction: Direction) -> HashSet<String> {
        let mut result = HashSet::new();
        let Some(&start) = self.index.get(id) else {
            return result;
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for next in self.inner.neighbors_directed(node, direction) {
                if visited.insert(next) {
                    if let Some(name) = self.inner.node_weight(next) {
                        result.insert(name.clone());
                    }
                    queue.push_back(next);
                }
            }
        }

        result
    }

    /// Modules in both components' transitive closures.
    pub fn shared_dependencies(&self, a: &str, b: &str) -> HashSet<String> {
        let deps_a = self.transitive_dependencies(a);
        let deps_b = self.transitive_dependencies(b);
        deps_a.intersection(&deps_b).cloned().collect()
    }

    /// Modules reachable only from `id` among the given top-level set:
    /// the transitive closure of `id` minus the union of every other
    /// top-level closure. Summing exclusive sizes across siblings never
    /// double-counts a shared dependency.
    pub fn exclusive_dependencies(&self, id: &str, top_level: &[String]) -> HashSet<String> {
        let mut result = self.transitive_dependencies(id);
        for other in top_level {
            if other == id {
                continue;
            }
            for shared in self.transitive_dependencies(other) {
                result.remove(&shared);
            }
        }
        result
    }

    /// Depth-first cycle search with an explicit recursion stack. When a
    /// node already on the stack is revisited, the reported cycle is the
    /// path-stack slice from that node's first occurrence through the
    /// current node. Overlapping cycles may be reported more than once;
    /// the list is not reduced to a minimal basis.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = Vec::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut in_stack: HashSet<NodeIndex> = HashSet::new();
        let mut path: Vec<NodeIndex> = Vec::new();
        // Frames of (node, outgoing neighbors, next neighbor offset).
        let mut frames: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

        for start in self.inner.node_indices() {
            if visited.contains(&start) {
                continue;
            }
            visited.insert(start);
            in_stack.insert(start);
            path.push(start);
            frames.push((start, self.inner.neighbors(start).collect(), 0));

            while !frames.is_empty() {
                let mut descend: Option<NodeIndex> = None;
                {
                    let Some((node, neighbors, offset)) = frames.last_mut() else {
                        break;
                    };
                    if *offset < neighbors.len() {
                        let next = neighbors[*offset];
                        *offset += 1;
                        if in_stack.contains(&next) {
                            if let Some(pos) = path.iter().position(|&n| n == next) {
                                let cycle = path[pos..]
                                    .iter()
                                    .filter_map(|&n| self.inner.node_weight(n).cloned())
                                    .collect();
                                cycles.push(cycle);
                            }
                        } else if !visited.contains(&next) {
                            descend = Some(next);
                        }
                    } else {
                        in_stack.remove(node);
                        path.pop();
                        frames.pop();
                        continue;
                    }
                }
                if let Some(next) = descend {
                    visited.insert(next);
                    in_stack.insert(next);
                    path.push(next);
                    frames.push((next, self.inner.neighbors(next).collect(), 0));
                }
            }
        }

        cycles
    }

    /// Kahn's algorithm over precomputed in-degrees. Returns `None` when
    /// the graph has a cycle, never a partial order.
    pub fn topological_sort(&self) -> Option<Vec<String>> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .inner
            .node_indices()
            .map(|n| {
                (
                    n,
                    self.inner.neighbors_directed(n, Direction::Incoming).count(),
                )
            })
            .collect();

        let mut queue: VecDeque<NodeIndex> = self
            .inner
            .node_indices()
            .filter(|n| in_degree.get(n) == Some(&0))
            .collect();

        let mut order: Vec<String> = Vec::with_capacity(self.inner.node_count());
        while let Some(node) = queue.pop_front() {
            if let Some(name) = self.inner.node_weight(node) {
                order.push(name.clone());
            }
            for next in self.inner.neighbors(node) {
                if let Some(degree) = in_degree.get_mut(&next) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }

        if order.len() < self.inner.node_count() {
            None
        } else {
            Some(order)
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
