use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::constants::limits::MAX_LOOP_NESTING_DEPTH;
use crate::error::SchedulerError;
use crate::graph::DependencyGraph;
use crate::registry::{AuxEdgeMode, ControllerRegistry, LoopController};
use crate::scc::{CollapsedGraph, SccAnalyzer, build_digraph, stable_toposort};

/// One entry in a computed execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ScheduleItem {
    /// Run the named component once
    RunNode(String),
    /// Delegate an entire loop to its owning controller
    HandOffToController(String),
}

impl ScheduleItem {
    /// The component or controller name this item covers
    pub fn name(&self) -> &str {
        match self {
            ScheduleItem::RunNode(name) | ScheduleItem::HandOffToController(name) => name,
        }
    }

    pub fn is_hand_off(&self) -> bool {
        matches!(self, ScheduleItem::HandOffToController(_))
    }
}

impl std::fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleItem::RunNode(name) => write!(f, "run '{name}'"),
            ScheduleItem::HandOffToController(name) => {
                write!(f, "hand off to controller '{name}'")
            }
        }
    }
}

fn item_for(name: &str, registry: &ControllerRegistry) -> ScheduleItem {
    if registry.is_controller(name) {
        ScheduleItem::HandOffToController(name.to_string())
    } else {
        ScheduleItem::RunNode(name.to_string())
    }
}

/// Computes dependency-ordered execution sequences
///
/// Stateless between calls: strongly connected components and collapsed
/// graphs are computed fresh on every request, since the graph is mutable
/// between requests.
#[derive(Debug)]
pub struct Sequencer {
    analyzer: SccAnalyzer,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Create a new sequencer
    pub fn new() -> Self {
        Self {
            analyzer: SccAnalyzer::new(),
        }
    }

    /// Compute the flat execution order for `graph` with the controllers in
    /// `registry` recognized.
    ///
    /// The only recoverable failure mode is an `InternalInvariant`: a loop
    /// with no controller, irreducible controller nesting, or a cycle that
    /// bypassed the connect-time guard. All of these indicate a bug in
    /// graph construction elsewhere, not bad user input.
    pub fn compute_order(
        &self,
        graph: &DependencyGraph,
        registry: &ControllerRegistry,
    ) -> Result<Vec<ScheduleItem>, SchedulerError> {
        let nodes = graph.node_names();
        let base_edges = graph.edge_pairs();
        let controllers = registry.controllers_in(&nodes);
        debug!(
            nodes = nodes.len(),
            controllers = controllers.len(),
            "computing execution order"
        );

        match controllers.as_slice() {
            [] => self.sort_flat(&nodes, &base_edges, registry),
            [controller] => {
                let mut edges = base_edges;
                edges.extend(controller.auxiliary_edges(AuxEdgeMode::OutputOnly));
                self.sort_flat(&nodes, &edges, registry)
            }
            _ => self.resolve_scope(&nodes, &base_edges, registry, 0),
        }
    }

    /// Topologically sort a graph known to be acyclic and emit one item per
    /// node.
    fn sort_flat(
        &self,
        nodes: &[String],
        edges: &[(String, String)],
        registry: &ControllerRegistry,
    ) -> Result<Vec<ScheduleItem>, SchedulerError> {
        let (graph, _) = build_digraph(nodes, edges);
        let order = stable_toposort(&graph).ok_or_else(|| SchedulerError::InternalInvariant {
            message: "merged graph is not sortable; an auxiliary edge bypassed the cycle guard"
                .to_string(),
        })?;

        Ok(order
            .into_iter()
            .map(|idx| item_for(graph[idx], registry))
            .collect())
    }

    /// Resolve a scope holding two or more controllers: merge every
    /// auxiliary edge, collapse the resulting strongly connected
    /// components, and emit them in topological order.
    fn resolve_scope(
        &self,
        nodes: &[String],
        base_edges: &[(String, String)],
        registry: &ControllerRegistry,
        depth: usize,
    ) -> Result<Vec<ScheduleItem>, SchedulerError> {
        if depth > MAX_LOOP_NESTING_DEPTH {
            return Err(SchedulerError::InternalInvariant {
                message: format!("loop nesting exceeds {MAX_LOOP_NESTING_DEPTH} levels"),
            });
        }
        trace!(depth, nodes = nodes.len(), "resolving scope");

        let mut merged = base_edges.to_vec();
        for controller in registry.controllers_in(nodes) {
            merged.extend(controller.auxiliary_edges(AuxEdgeMode::All));
        }

        let partition = self.analyzer.analyze(nodes, &merged);
        let collapsed = CollapsedGraph::build(&partition, &merged);

        let mut items = Vec::new();
        for id in collapsed.sorted_components()? {
            let scc = &partition.components()[id];
            if scc.is_loop() {
                items.extend(self.resolve_loop(scc.members(), base_edges, registry, depth)?);
            } else if let Some(name) = scc.members().first() {
                items.push(item_for(name, registry));
            }
        }
        Ok(items)
    }

    /// Resolve one loop (an SCC of size > 1) into schedule items.
    fn resolve_loop(
        &self,
        members: &[String],
        base_edges: &[(String, String)],
        registry: &ControllerRegistry,
        depth: usize,
    ) -> Result<Vec<ScheduleItem>, SchedulerError> {
        let inside = registry.controllers_in(members);
        match inside.as_slice() {
            [] => Err(SchedulerError::InternalInvariant {
                message: format!("loop without a controller: [{}]", members.join(", ")),
            }),
            [controller] => Ok(vec![ScheduleItem::HandOffToController(
                controller.name().to_string(),
            )]),
            _ => self.subdivide_loop(members, base_edges, registry, &inside, depth),
        }
    }

    /// Subdivide a loop holding several controllers.
    ///
    /// Controllers whose loops are nested inside another controller's loop
    /// are invisible at this level: if exactly one root controller remains
    /// the whole loop is handed to it. Sibling roots glued into one
    /// component have their closed loops collapsed to single nodes over
    /// base edges only, and resolution recurses on the strictly smaller
    /// graph with the registry narrowed to the roots.
    fn subdivide_loop(
        &self,
        members: &[String],
        base_edges: &[(String, String)],
        registry: &ControllerRegistry,
        inside: &[Arc<dyn LoopController>],
        depth: usize,
    ) -> Result<Vec<ScheduleItem>, SchedulerError> {
        let controller_names: HashSet<&str> = inside.iter().map(|c| c.name()).collect();

        // the member scope of a controller: the nodes of its own loop,
        // controllers excluded, so that nesting is judged on loop bodies
        let member_scopes: Vec<HashSet<String>> = inside
            .iter()
            .map(|controller| {
                let mut scope = self.loop_scope(
                    members,
                    base_edges,
                    controller.name(),
                    std::slice::from_ref(controller),
                );
                scope.retain(|name| !controller_names.contains(name.as_str()));
                scope
            })
            .collect();

        let nested_in = |a: usize, b: usize| {
            member_scopes[a].len() < member_scopes[b].len()
                && member_scopes[a].is_subset(&member_scopes[b])
        };

        let roots: Vec<usize> = (0..inside.len())
            .filter(|&i| (0..inside.len()).all(|j| j == i || !nested_in(i, j)))
            .collect();

        if let [root] = roots.as_slice() {
            trace!(
                controller = inside[*root].name(),
                "loop driven by one root controller"
            );
            return Ok(vec![ScheduleItem::HandOffToController(
                inside[*root].name().to_string(),
            )]);
        }

        // each root claims its closed loop: its own scope plus the loops of
        // every controller nested under it
        let mut owner: HashMap<String, String> = HashMap::new();
        for &root in &roots {
            let root_name = inside[root].name();
            let with_nested: Vec<Arc<dyn LoopController>> = (0..inside.len())
                .filter(|&i| i == root || nested_in(i, root))
                .map(|i| Arc::clone(&inside[i]))
                .collect();

            for node in self.loop_scope(members, base_edges, root_name, &with_nested) {
                if node == root_name {
                    continue;
                }
                if let Some(previous) = owner.insert(node.clone(), root_name.to_string())
                    && previous != root_name
                {
                    return Err(SchedulerError::InternalInvariant {
                        message: format!(
                            "component '{node}' is claimed by controllers '{previous}' and '{root_name}'"
                        ),
                    });
                }
            }
        }

        if owner.is_empty() {
            return Err(SchedulerError::InternalInvariant {
                message: format!(
                    "unable to subdivide loop [{}]; no controller loop covers it",
                    members.join(", ")
                ),
            });
        }

        let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();
        let mapped =
            |name: &str| owner.get(name).cloned().unwrap_or_else(|| name.to_string());

        let mut collapsed_nodes: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for member in members {
            let node = mapped(member);
            if seen.insert(node.clone()) {
                collapsed_nodes.push(node);
            }
        }

        let mut collapsed_edges: Vec<(String, String)> = Vec::new();
        for (src, dst) in base_edges {
            if member_set.contains(src.as_str()) && member_set.contains(dst.as_str()) {
                let (src, dst) = (mapped(src), mapped(dst));
                if src != dst {
                    collapsed_edges.push((src, dst));
                }
            }
        }

        let root_names: Vec<String> = roots
            .iter()
            .map(|&i| inside[i].name().to_string())
            .collect();
        trace!(roots = ?root_names, "subdividing sibling loops");
        self.resolve_scope(
            &collapsed_nodes,
            &collapsed_edges,
            &registry.scoped_to(&root_names),
            depth + 1,
        )
    }

    /// The loop scope around `focus`: members of the SCC containing it
    /// under the base edges plus the auxiliary edges of `aux_from`, all
    /// restricted to `members`.
    fn loop_scope(
        &self,
        members: &[String],
        base_edges: &[(String, String)],
        focus: &str,
        aux_from: &[Arc<dyn LoopController>],
    ) -> HashSet<String> {
        let mut edges = base_edges.to_vec();
        for controller in aux_from {
            edges.extend(controller.auxiliary_edges(AuxEdgeMode::All));
        }

        let partition = self.analyzer.analyze(members, &edges);
        match partition.component_of(focus) {
            Some(id) => partition.components()[id]
                .members()
                .iter()
                .cloned()
                .collect(),
            None => HashSet::new(),
        }
    }
}
