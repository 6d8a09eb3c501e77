use std::collections::{HashMap, VecDeque};

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::SchedulerError;

/// Build a petgraph digraph from a named node set and edge set.
///
/// Edges whose endpoints are not in `nodes` are dropped, which is how every
/// caller restricts a wider edge set to a scope. Parallel edges collapse to
/// one.
pub(crate) fn build_digraph<'a>(
    nodes: &'a [String],
    edges: &[(String, String)],
) -> (DiGraph<&'a str, ()>, HashMap<&'a str, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut indices = HashMap::with_capacity(nodes.len());

    for name in nodes {
        let idx = graph.add_node(name.as_str());
        indices.insert(name.as_str(), idx);
    }

    for (src, dst) in edges {
        if let (Some(&s), Some(&d)) = (indices.get(src.as_str()), indices.get(dst.as_str()))
            && graph.find_edge(s, d).is_none()
        {
            graph.add_edge(s, d, ());
        }
    }

    (graph, indices)
}

/// Kahn's algorithm with a FIFO ready queue.
///
/// Ties between simultaneously-ready nodes break on node insertion order,
/// which keeps the produced sequence deterministic for identical graphs.
/// Returns `None` when the graph has a cycle.
pub(crate) fn stable_toposort<N, E>(graph: &DiGraph<N, E>) -> Option<Vec<NodeIndex>> {
    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
        .collect();

    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for succ in graph.neighbors(idx) {
            in_degree[succ.index()] -= 1;
            if in_degree[succ.index()] == 0 {
                queue.push_back(succ);
            }
        }
    }

    (order.len() == graph.node_count()).then_some(order)
}

/// Decomposes directed graphs into strongly connected components
///
/// Works over a name-level node set + edge set so that the same analyzer
/// serves the base graph, merged graphs and narrowed subgraphs.
#[derive(Debug, Default)]
pub struct SccAnalyzer;

impl SccAnalyzer {
    /// Create a new SCC analyzer
    pub fn new() -> Self {
        Self
    }

    /// Partition `nodes` into strongly connected components.
    ///
    /// Components are returned in reverse topological order of the
    /// condensation (Tarjan's emission order). An empty node set yields an
    /// empty partition; every node outside a real cycle lands in a trivial
    /// component of size 1.
    pub fn analyze(&self, nodes: &[String], edges: &[(String, String)]) -> SccPartition {
        let (graph, _) = build_digraph(nodes, edges);

        let components = tarjan_scc(&graph)
            .into_iter()
            .map(|scc| Scc {
                members: scc.into_iter().map(|idx| graph[idx].to_string()).collect(),
            })
            .collect();

        SccPartition::new(components)
    }
}

/// A partition of a node set into strongly connected components
#[derive(Debug, Clone)]
pub struct SccPartition {
    components: Vec<Scc>,
    membership: HashMap<String, usize>,
}

impl SccPartition {
    fn new(components: Vec<Scc>) -> Self {
        let mut membership = HashMap::new();
        for (id, scc) in components.iter().enumerate() {
            for member in &scc.members {
                membership.insert(member.clone(), id);
            }
        }
        Self {
            components,
            membership,
        }
    }

    pub fn components(&self) -> &[Scc] {
        &self.components
    }

    /// Index of the component containing `name`, if the node was analyzed
    pub fn component_of(&self, name: &str) -> Option<usize> {
        self.membership.get(name).copied()
    }

    /// Components of size > 1, in partition order
    pub fn loops(&self) -> impl Iterator<Item = &Scc> {
        self.components.iter().filter(|scc| scc.is_loop())
    }

    pub fn has_loops(&self) -> bool {
        self.loops().next().is_some()
    }
}

/// One strongly connected component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scc {
    members: Vec<String>,
}

impl Scc {
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A component of size > 1 is a loop; size 1 is an ordinary node
    pub fn is_loop(&self) -> bool {
        self.members.len() > 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}

/// The graph of SCC identifiers derived from a partition
///
/// Component A has an edge to component B iff some underlying edge crosses
/// from a node in A to a node in B, A != B. Acyclic by construction, which
/// is what makes topological sorting possible when the underlying graph has
/// loops. Never persisted past a single scheduling pass.
#[derive(Debug)]
pub struct CollapsedGraph {
    graph: DiGraph<usize, ()>,
}

impl CollapsedGraph {
    /// Collapse a partition over the edge set it was computed from
    pub fn build(partition: &SccPartition, edges: &[(String, String)]) -> Self {
        let mut graph = DiGraph::new();
        let indices: Vec<NodeIndex> = (0..partition.components().len())
            .map(|id| graph.add_node(id))
            .collect();

        for (src, dst) in edges {
            if let (Some(a), Some(b)) = (partition.component_of(src), partition.component_of(dst))
                && a != b
                && graph.find_edge(indices[a], indices[b]).is_none()
            {
                graph.add_edge(indices[a], indices[b], ());
            }
        }

        Self { graph }
    }

    /// Component ids in topological order.
    ///
    /// A cycle here cannot come from user input (the condensation of any
    /// graph is acyclic) and is reported as a fatal internal error.
    pub fn sorted_components(&self) -> Result<Vec<usize>, SchedulerError> {
        stable_toposort(&self.graph)
            .map(|order| order.into_iter().map(|idx| self.graph[idx]).collect())
            .ok_or_else(|| SchedulerError::InternalInvariant {
                message: "cycle in the collapsed component graph".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn edges(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_graph() {
        let partition = SccAnalyzer::new().analyze(&[], &[]);
        assert!(partition.components().is_empty());
        assert!(!partition.has_loops());
    }

    #[test]
    fn test_acyclic_graph_is_all_trivial_components() {
        let partition = SccAnalyzer::new().analyze(
            &names(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("b", "c")]),
        );

        assert_eq!(partition.components().len(), 3);
        assert!(partition.components().iter().all(|scc| !scc.is_loop()));
    }

    #[test]
    fn test_cycle_forms_single_component() {
        let partition = SccAnalyzer::new().analyze(
            &names(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("b", "c"), ("c", "a")]),
        );

        assert_eq!(partition.components().len(), 1);
        let scc = &partition.components()[0];
        assert!(scc.is_loop());
        assert_eq!(scc.len(), 3);
    }

    #[test]
    fn test_disconnected_components() {
        let partition = SccAnalyzer::new().analyze(
            &names(&["a", "b", "x", "y"]),
            &edges(&[("a", "b"), ("b", "a"), ("x", "y")]),
        );

        assert_eq!(partition.components().len(), 3);
        assert_eq!(partition.loops().count(), 1);
    }

    #[test]
    fn test_reverse_topological_component_order() {
        // a -> b means b's component is emitted before a's
        let partition =
            SccAnalyzer::new().analyze(&names(&["a", "b"]), &edges(&[("a", "b")]));

        assert_eq!(partition.components()[0].members(), ["b".to_string()]);
        assert_eq!(partition.components()[1].members(), ["a".to_string()]);
    }

    #[test]
    fn test_edges_outside_node_set_are_dropped() {
        let partition = SccAnalyzer::new().analyze(
            &names(&["a", "b"]),
            &edges(&[("a", "b"), ("b", "stranger"), ("stranger", "a")]),
        );

        assert!(!partition.has_loops());
        assert!(partition.component_of("stranger").is_none());
    }

    #[test]
    fn test_collapsed_graph_sorts_loops() {
        let node_list = names(&["pre", "a", "b", "post"]);
        let edge_list = edges(&[("pre", "a"), ("a", "b"), ("b", "a"), ("b", "post")]);

        let partition = SccAnalyzer::new().analyze(&node_list, &edge_list);
        let collapsed = CollapsedGraph::build(&partition, &edge_list);
        let order = collapsed.sorted_components().unwrap();

        let position = |name: &str| {
            order
                .iter()
                .position(|&id| partition.components()[id].contains(name))
                .unwrap()
        };
        assert!(position("pre") < position("a"));
        assert!(position("a") < position("post"));
        assert_eq!(position("a"), position("b"));
    }

    #[test]
    fn test_stable_toposort_rejects_cycle() {
        let node_list = names(&["a", "b"]);
        let edge_list = edges(&[("a", "b"), ("b", "a")]);
        let (graph, _) = build_digraph(&node_list, &edge_list);

        assert!(stable_toposort(&graph).is_none());
    }

    #[test]
    fn test_stable_toposort_chain() {
        let node_list = names(&["a", "b", "c"]);
        let edge_list = edges(&[("a", "b"), ("b", "c")]);
        let (graph, _) = build_digraph(&node_list, &edge_list);

        let order: Vec<&str> = stable_toposort(&graph)
            .unwrap()
            .into_iter()
            .map(|idx| graph[idx])
            .collect();
        assert_eq!(order, ["a", "b", "c"]);
    }
}
