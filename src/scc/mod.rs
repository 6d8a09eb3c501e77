//! # Strongly-Connected-Component Analysis Module
//!
//! This module decomposes a directed graph into strongly connected
//! components and collapses them into a sortable graph-of-components.
//!
//! ## Algorithm
//!
//! Tarjan's SCC algorithm (via `petgraph`) runs in O(V + E) and yields
//! components in reverse topological order of the condensation. That order
//! is the documented determinism convention for the whole crate: identical
//! input graphs always produce identical partitions in identical order.
//!
//! ## Key Components
//!
//! - **SccAnalyzer**: partitions a named node set + edge set into SCCs
//! - **SccPartition** / **Scc**: the partition and its components, tagged by
//!   size (`is_loop` for size > 1)
//! - **CollapsedGraph**: the SCC-id level graph, acyclic by construction,
//!   used to make topological sorting possible when loops exist
//!
//! ## Example
//!
//! ```
//! use dataflow_scheduler::scc::SccAnalyzer;
//!
//! let nodes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
//! let edges = vec![
//!     ("a".to_string(), "b".to_string()),
//!     ("b".to_string(), "a".to_string()),
//!     ("b".to_string(), "c".to_string()),
//! ];
//!
//! let partition = SccAnalyzer::new().analyze(&nodes, &edges);
//!
//! assert_eq!(partition.components().len(), 2);
//! assert!(partition.has_loops());
//! let cycle = partition.loops().next().unwrap();
//! assert_eq!(cycle.len(), 2);
//! assert!(cycle.contains("a") && cycle.contains("b"));
//! ```

mod analyzer_impl;

pub use analyzer_impl::{CollapsedGraph, Scc, SccAnalyzer, SccPartition};
pub(crate) use analyzer_impl::{build_digraph, stable_toposort};
