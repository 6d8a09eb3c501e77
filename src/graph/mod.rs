//! # Dependency Graph Module
//!
//! The mutable, reference-counted graph of data dependencies between named
//! components.
//!
//! ## Components
//!
//! - **DependencyGraph**: node and edge mutation with transactional cycle
//!   guarding - a `connect` that would create a cycle in the base graph is
//!   reverted before the error is returned
//! - **EdgeInfo**: read-only view of one edge and its live connection count
//!
//! Edges carry a reference count: several independent data connections
//! between the same pair of components share one edge, and the edge is
//! removed only when the last connection is disconnected.
//!
//! ## Example
//!
//! ```
//! use dataflow_scheduler::graph::DependencyGraph;
//!
//! # fn main() -> Result<(), dataflow_scheduler::error::SchedulerError> {
//! let mut graph = DependencyGraph::new();
//! graph.add_node("pump");
//! graph.add_node("turbine");
//!
//! graph.connect("pump", "turbine")?;
//! graph.connect("pump", "turbine")?; // second data connection, same edge
//! assert_eq!(graph.ref_count("pump", "turbine"), Some(2));
//!
//! graph.disconnect("pump", "turbine")?;
//! assert_eq!(graph.ref_count("pump", "turbine"), Some(1));
//!
//! // the reverse connection would close a cycle and is rejected
//! assert!(graph.connect("turbine", "pump").is_err());
//! assert_eq!(graph.ref_count("turbine", "pump"), None);
//! # Ok(())
//! # }
//! ```

mod dependency_graph;
mod types;

pub use dependency_graph::DependencyGraph;
pub use types::EdgeInfo;
