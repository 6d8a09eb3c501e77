use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use tracing::debug;

use super::types::EdgeInfo;
use crate::detector::CycleGuard;
use crate::error::SchedulerError;

/// The base graph of data dependencies between named components
///
/// Node weights are component names, edge weights are live connection
/// counts. A stable graph keeps the name-to-index map valid across node
/// removal. The base graph is kept acyclic at all times: `connect` is
/// transactional and reverts the edge before reporting a cycle.
pub struct DependencyGraph {
    graph: StableDiGraph<String, u32>,
    indices: HashMap<String, NodeIndex>,
    guard: CycleGuard,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Create an empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            indices: HashMap::new(),
            guard: CycleGuard::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Add a component node. A no-op when the name is already present.
    pub fn add_node(&mut self, name: &str) {
        if !self.indices.contains_key(name) {
            let idx = self.graph.add_node(name.to_string());
            self.indices.insert(name.to_string(), idx);
        }
    }

    /// Remove a component node and every edge incident to it.
    pub fn remove_node(&mut self, name: &str) -> Result<(), SchedulerError> {
        let idx = self.index_of(name)?;
        self.indices.remove(name);
        self.graph.remove_node(idx);
        Ok(())
    }

    /// Record a data connection: `dst` consumes output produced by `src`.
    ///
    /// An existing edge just gains a reference; a new edge is checked by the
    /// cycle guard and reverted if it would make the base graph cyclic, in
    /// which case the error carries the full implicated node set, sorted.
    pub fn connect(&mut self, src: &str, dst: &str) -> Result<(), SchedulerError> {
        if src == dst {
            return Err(SchedulerError::SelfDependency {
                name: src.to_string(),
            });
        }
        let s = self.index_of(src)?;
        let d = self.index_of(dst)?;

        if let Some(edge) = self.graph.find_edge(s, d) {
            // more references over an edge that already exists cannot change
            // reachability
            if let Some(count) = self.graph.edge_weight_mut(edge) {
                *count += 1;
            }
            return Ok(());
        }

        let edge = self.graph.add_edge(s, d, 1);
        if let Err(loops) = self.guard.check(&self.node_names(), &self.edge_pairs()) {
            self.graph.remove_edge(edge);
            let mut nodes: Vec<String> = loops.into_iter().flatten().collect();
            nodes.sort();
            nodes.dedup();
            debug!(%src, %dst, implicated = ?nodes, "rejected connection");
            return Err(SchedulerError::CyclicDependency {
                src: src.to_string(),
                dst: dst.to_string(),
                nodes,
            });
        }
        Ok(())
    }

    /// Drop one data connection between `src` and `dst`.
    ///
    /// The edge disappears when its last reference is dropped. Unlike the
    /// node-level operations, a missing edge is an `UnknownEdge` error
    /// rather than a silent no-op.
    pub fn disconnect(&mut self, src: &str, dst: &str) -> Result<(), SchedulerError> {
        let s = self.index_of(src)?;
        let d = self.index_of(dst)?;

        let Some(edge) = self.graph.find_edge(s, d) else {
            return Err(SchedulerError::UnknownEdge {
                src: src.to_string(),
                dst: dst.to_string(),
            });
        };

        let remaining = match self.graph.edge_weight_mut(edge) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            self.graph.remove_edge(edge);
        }
        Ok(())
    }

    /// Live connection count for the edge, or `None` when absent
    pub fn ref_count(&self, src: &str, dst: &str) -> Option<u32> {
        let s = *self.indices.get(src)?;
        let d = *self.indices.get(dst)?;
        let edge = self.graph.find_edge(s, d)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Component names in insertion order
    pub fn node_names(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// All edges as (src, dst) name pairs
    pub fn edge_pairs(&self) -> Vec<(String, String)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].clone(),
                    self.graph[edge.target()].clone(),
                )
            })
            .collect()
    }

    /// All edges with their connection counts
    pub fn edge_infos(&self) -> Vec<EdgeInfo> {
        self.graph
            .edge_references()
            .map(|edge| EdgeInfo {
                src: self.graph[edge.source()].clone(),
                dst: self.graph[edge.target()].clone(),
                ref_count: *edge.weight(),
            })
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex, SchedulerError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| SchedulerError::UnknownNode {
                name: name.to_string(),
            })
    }
}
