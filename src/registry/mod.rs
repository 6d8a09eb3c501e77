//! # Loop Controller Registry Module
//!
//! Loop controllers are the components that own iterative loops: a
//! controller contributes *auxiliary* ordering edges which are allowed to
//! close cycles in the combined graph, and at run time it is handed the
//! whole loop to iterate until convergence.
//!
//! ## Components
//!
//! - **LoopController**: the contract a controller exposes to the scheduler
//!   (its name, and its auxiliary edges per [`AuxEdgeMode`])
//! - **ControllerRegistry**: a declaration-ordered collection of controller
//!   references; the order controllers were registered in is the
//!   deterministic order every query returns them in
//! - **DeclaredController**: a controller description backed by fixed edge
//!   lists, for callers that wire controllers declaratively
//!
//! Controllers are referenced, never owned: the registry holds shared
//! handles and the scheduler never mutates a controller. The active
//! registry is always passed explicitly into scheduling calls - it is never
//! ambient state.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use dataflow_scheduler::registry::{
//!     AuxEdgeMode, ControllerRegistry, DeclaredController, LoopController,
//! };
//!
//! let solver = DeclaredController::new("solver")
//!     .monitors("residual")
//!     .writes("guess");
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register(Arc::new(solver));
//!
//! assert!(registry.is_controller("solver"));
//! let all = registry.controllers()[0].auxiliary_edges(AuxEdgeMode::All);
//! assert_eq!(all.len(), 2);
//! ```

mod registry_impl;

pub use registry_impl::*;
