//! # Dataflow Scheduler - Dependency-Ordered Execution for Component Networks
//!
//! This crate decides *which order* to run a network of interdependent
//! computational components in, including networks where some components
//! form iterative loops owned by nested "loop controller" nodes. It never
//! evaluates a component itself: the output is a flat, deterministic
//! sequence of run and hand-off items that an external execution driver
//! walks synchronously.
//!
//! ## Main Components
//!
//! - **Graph**: the mutable, reference-counted dependency graph with
//!   transactional cycle guarding on every connection
//! - **Detector**: the cycle guard - a pure DAG check reporting guilty
//!   strongly connected sets
//! - **Registry**: loop controllers and their auxiliary ordering edges,
//!   queried (never owned) by the scheduler
//! - **Scc**: Tarjan-based strongly-connected-component analysis and the
//!   collapsed graph-of-components
//! - **Scheduler**: the sequencer that interleaves plain components with
//!   whole-loop hand-offs, recursively resolving loops within loops
//! - **Reports**: human-readable and JSON renderings of a computed order
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use dataflow_scheduler::graph::DependencyGraph;
//! use dataflow_scheduler::registry::{ControllerRegistry, DeclaredController};
//! use dataflow_scheduler::scheduler::{ScheduleItem, Sequencer};
//!
//! # fn main() -> Result<(), dataflow_scheduler::error::SchedulerError> {
//! // Components and their data connections
//! let mut graph = DependencyGraph::new();
//! graph.add_node("heater");
//! graph.add_node("reactor");
//! graph.add_node("solver");
//! graph.connect("heater", "reactor")?;
//!
//! // The solver iterates the reactor loop: it monitors the reactor's
//! // output and writes the heater's input on every iteration
//! let mut registry = ControllerRegistry::new();
//! registry.register(Arc::new(
//!     DeclaredController::new("solver")
//!         .monitors("reactor")
//!         .writes("heater"),
//! ));
//!
//! let order = Sequencer::new().compute_order(&graph, &registry)?;
//! assert_eq!(
//!     order,
//!     vec![
//!         ScheduleItem::RunNode("heater".to_string()),
//!         ScheduleItem::RunNode("reactor".to_string()),
//!         ScheduleItem::HandOffToController("solver".to_string()),
//!     ]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Cycle guarding
//!
//! The base graph must stay acyclic: feedback belongs to a controller's
//! auxiliary edges, never to plain connections. A `connect` that would
//! close a cycle is rolled back before the error returns:
//!
//! ```
//! use dataflow_scheduler::error::SchedulerError;
//! use dataflow_scheduler::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_node("a");
//! graph.add_node("b");
//! graph.connect("a", "b").unwrap();
//!
//! match graph.connect("b", "a") {
//!     Err(SchedulerError::CyclicDependency { nodes, .. }) => {
//!         assert_eq!(nodes, vec!["a".to_string(), "b".to_string()]);
//!     }
//!     other => panic!("expected a cycle error, got {other:?}"),
//! }
//!
//! // the graph is exactly as it was before the failed call
//! assert_eq!(graph.ref_count("b", "a"), None);
//! assert_eq!(graph.ref_count("a", "b"), Some(1));
//! ```
//!
//! ## Ordering contract
//!
//! For any two nodes connected by a path in the combined graph, the
//! produced sequence runs them in path order; nodes with no path between
//! them may be reordered freely by the execution driver. Scheduling is
//! single-threaded and synchronous; callers serialize graph mutation
//! against sequence computation.

// Private modules
mod constants;

// Public modules
pub mod detector;
pub mod error;
pub mod graph;
pub mod registry;
pub mod reports;
pub mod scc;
pub mod scheduler;
