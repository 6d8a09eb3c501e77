//! # Sequencing Module
//!
//! Produces the flat, deterministic execution order for a dependency graph
//! with zero or more loop controllers in scope.
//!
//! ## Algorithm
//!
//! - **No controllers**: the base graph is already acyclic (the cycle guard
//!   enforces that at connect time), so the order is a plain topological
//!   sort.
//! - **One controller**: the controller's output-direction auxiliary edges
//!   are merged in and the result sorted directly; the controller node
//!   stands in for its whole loop and iterates it internally once invoked.
//! - **Several controllers**: all auxiliary edges are merged, which closes
//!   one or more cycles. Each strongly connected component of the merged
//!   graph collapses to one schedulable unit; components are emitted in
//!   topological order of the collapsed graph. A loop component driven by a
//!   single (root) controller becomes one hand-off; loops holding several
//!   sibling controllers are subdivided recursively over base edges only.
//!
//! Every item in the result is either `RunNode(name)` - invoke the
//! component once - or `HandOffToController(name)` - delegate the whole
//! loop to that controller, which may itself re-enter this scheduler on its
//! inner scope.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use dataflow_scheduler::graph::DependencyGraph;
//! use dataflow_scheduler::registry::{ControllerRegistry, DeclaredController};
//! use dataflow_scheduler::scheduler::{ScheduleItem, Sequencer};
//!
//! # fn main() -> Result<(), dataflow_scheduler::error::SchedulerError> {
//! let mut graph = DependencyGraph::new();
//! graph.add_node("a");
//! graph.add_node("b");
//! graph.add_node("solver");
//! graph.connect("a", "b")?;
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register(Arc::new(
//!     DeclaredController::new("solver").monitors("b").writes("a"),
//! ));
//!
//! let order = Sequencer::new().compute_order(&graph, &registry)?;
//! assert_eq!(
//!     order,
//!     vec![
//!         ScheduleItem::RunNode("a".to_string()),
//!         ScheduleItem::RunNode("b".to_string()),
//!         ScheduleItem::HandOffToController("solver".to_string()),
//!     ]
//! );
//! # Ok(())
//! # }
//! ```

mod sequencer_impl;

pub use sequencer_impl::*;
