//! # Cycle Guard Module
//!
//! Validates that the base dependency graph stays acyclic.
//!
//! The guard is a pure check over a node set + edge set: `Ok` when the graph
//! is a DAG, otherwise the member sets of every strongly connected component
//! of size > 1. [`crate::graph::DependencyGraph::connect`] uses it
//! transactionally (apply the edge, check, revert and raise on failure);
//! callers that stage several mutations can also invoke it directly.
//!
//! The order of reported components follows the SCC analyzer's convention
//! (reverse topological). That order is stable for identical graphs but is
//! not part of the API contract beyond logging.
//!
//! ## Example
//!
//! ```
//! use dataflow_scheduler::detector::CycleGuard;
//!
//! let nodes = vec!["a".to_string(), "b".to_string()];
//! let ok_edges = vec![("a".to_string(), "b".to_string())];
//! let bad_edges = vec![
//!     ("a".to_string(), "b".to_string()),
//!     ("b".to_string(), "a".to_string()),
//! ];
//!
//! let guard = CycleGuard::new();
//! assert!(guard.check(&nodes, &ok_edges).is_ok());
//!
//! let loops = guard.check(&nodes, &bad_edges).unwrap_err();
//! assert_eq!(loops.len(), 1);
//! assert_eq!(loops[0].len(), 2);
//! ```

mod guard_impl;

pub use guard_impl::*;
