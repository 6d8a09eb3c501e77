use std::collections::HashSet;
use std::sync::Arc;

/// Which auxiliary edges of a controller to merge into the base graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxEdgeMode {
    /// Every auxiliary edge the controller contributes. Used when several
    /// controllers are in scope and their loops must surface as strongly
    /// connected components.
    All,
    /// Only the edges carrying loop-member *outputs* into the controller
    /// (member -> controller). Feedback edges written by the controller
    /// (controller -> member) are excluded, so a lone controller sorts
    /// after the members that produce what it monitors without closing a
    /// cycle. See the crate docs for the exact single-controller semantics.
    OutputOnly,
}

/// Contract a loop controller exposes to the scheduler.
///
/// The scheduler only ever asks a controller two things: what it is called,
/// and which auxiliary ordering edges its loop contributes. Running the
/// loop body to convergence stays entirely on the controller's side of the
/// boundary.
pub trait LoopController {
    /// Name of the controller's node in the dependency graph
    fn name(&self) -> &str;

    /// Auxiliary ordering edges as (src, dst) name pairs
    fn auxiliary_edges(&self, mode: AuxEdgeMode) -> Vec<(String, String)>;
}

/// Declaration-ordered collection of loop controller references
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    controllers: Vec<Arc<dyn LoopController>>,
}

impl ControllerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
        }
    }

    /// Register a controller. A controller with an already-registered name
    /// is ignored, keeping declaration order unambiguous.
    pub fn register(&mut self, controller: Arc<dyn LoopController>) {
        if !self.is_controller(controller.name()) {
            self.controllers.push(controller);
        }
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn is_controller(&self, name: &str) -> bool {
        self.controllers.iter().any(|c| c.name() == name)
    }

    /// All registered controllers, in declaration order
    pub fn controllers(&self) -> &[Arc<dyn LoopController>] {
        &self.controllers
    }

    /// The subset of `names` that are registered controllers, in
    /// declaration order.
    pub fn controllers_in(&self, names: &[String]) -> Vec<Arc<dyn LoopController>> {
        let name_set: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.controllers
            .iter()
            .filter(|c| name_set.contains(c.name()))
            .map(Arc::clone)
            .collect()
    }

    /// A registry narrowed to the controllers named in `names`, preserving
    /// declaration order. Used for recursive loop resolution.
    pub fn scoped_to(&self, names: &[String]) -> ControllerRegistry {
        ControllerRegistry {
            controllers: self.controllers_in(names),
        }
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.controllers.iter().map(|c| c.name()))
            .finish()
    }
}

/// A loop controller backed by fixed edge lists.
///
/// Callers whose controllers are wired declaratively (the assembly layer
/// knows which members a controller monitors and which parameters it
/// writes) can use this instead of implementing [`LoopController`] by hand.
pub struct DeclaredController {
    name: String,
    monitor_edges: Vec<(String, String)>,
    feedback_edges: Vec<(String, String)>,
}

impl DeclaredController {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            monitor_edges: Vec::new(),
            feedback_edges: Vec::new(),
        }
    }

    /// Declare that this controller consumes `member`'s output (adds the
    /// auxiliary edge member -> controller).
    pub fn monitors(mut self, member: &str) -> Self {
        self.monitor_edges
            .push((member.to_string(), self.name.clone()));
        self
    }

    /// Declare that this controller writes one of `member`'s inputs on each
    /// iteration (adds the feedback edge controller -> member).
    pub fn writes(mut self, member: &str) -> Self {
        self.feedback_edges
            .push((self.name.clone(), member.to_string()));
        self
    }
}

impl LoopController for DeclaredController {
    fn name(&self) -> &str {
        &self.name
    }

    fn auxiliary_edges(&self, mode: AuxEdgeMode) -> Vec<(String, String)> {
        match mode {
            AuxEdgeMode::All => {
                let mut edges = self.monitor_edges.clone();
                edges.extend(self.feedback_edges.iter().cloned());
                edges
            }
            AuxEdgeMode::OutputOnly => self.monitor_edges.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(name: &str) -> Arc<dyn LoopController> {
        Arc::new(DeclaredController::new(name))
    }

    #[test]
    fn test_declaration_order_preserved() {
        let mut registry = ControllerRegistry::new();
        registry.register(controller("outer"));
        registry.register(controller("inner"));

        let names: Vec<&str> = registry.controllers().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["outer", "inner"]);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut registry = ControllerRegistry::new();
        registry.register(controller("solver"));
        registry.register(controller("solver"));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_controllers_in_filters_and_orders() {
        let mut registry = ControllerRegistry::new();
        registry.register(controller("c1"));
        registry.register(controller("c2"));
        registry.register(controller("c3"));

        let scope = vec!["c3".to_string(), "plain".to_string(), "c1".to_string()];
        let found: Vec<String> = registry
            .controllers_in(&scope)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(found, ["c1".to_string(), "c3".to_string()]);
    }

    #[test]
    fn test_scoped_to_narrows() {
        let mut registry = ControllerRegistry::new();
        registry.register(controller("c1"));
        registry.register(controller("c2"));

        let narrowed = registry.scoped_to(&["c2".to_string()]);
        assert_eq!(narrowed.len(), 1);
        assert!(narrowed.is_controller("c2"));
        assert!(!narrowed.is_controller("c1"));
    }

    #[test]
    fn test_declared_controller_edge_modes() {
        let solver = DeclaredController::new("solver")
            .monitors("residual")
            .writes("guess");

        let all = solver.auxiliary_edges(AuxEdgeMode::All);
        assert_eq!(
            all,
            vec![
                ("residual".to_string(), "solver".to_string()),
                ("solver".to_string(), "guess".to_string()),
            ]
        );

        let output_only = solver.auxiliary_edges(AuxEdgeMode::OutputOnly);
        assert_eq!(
            output_only,
            vec![("residual".to_string(), "solver".to_string())]
        );
    }
}
