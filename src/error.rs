use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by the scheduling subsystem.
///
/// `CyclicDependency`, `SelfDependency`, `UnknownNode` and `UnknownEdge` are
/// recoverable: the graph is left exactly as it was before the failing call.
/// `InternalInvariant` is fatal and indicates a bug in graph construction
/// elsewhere in the system.
#[derive(Error, Debug, Diagnostic)]
pub enum SchedulerError {
    #[error("connecting '{src}' to '{dst}' would create a circular dependency among [{}]", .nodes.join(", "))]
    #[diagnostic(
        code(dataflow_scheduler::cyclic_dependency),
        help("Route the feedback through a loop controller, or remove one of the connections in the cycle")
    )]
    CyclicDependency {
        src: String,
        dst: String,
        /// Every node implicated in the would-be cycle, sorted by name.
        nodes: Vec<String>,
    },

    #[error("component '{name}' cannot depend on itself")]
    #[diagnostic(
        code(dataflow_scheduler::self_dependency),
        help("Internal feedback belongs to a loop controller's auxiliary edges, not the base graph")
    )]
    SelfDependency { name: String },

    #[error("unknown component '{name}'")]
    #[diagnostic(
        code(dataflow_scheduler::unknown_node),
        help("Add the component with add_node before referencing it")
    )]
    UnknownNode { name: String },

    #[error("no connection from '{src}' to '{dst}'")]
    #[diagnostic(
        code(dataflow_scheduler::unknown_edge),
        help("Check that the connection exists and has not already been fully disconnected")
    )]
    UnknownEdge { src: String, dst: String },

    #[error("internal invariant violated: {message}")]
    #[diagnostic(
        code(dataflow_scheduler::internal_invariant),
        help("This indicates a bug in graph construction - please report it")
    )]
    InternalInvariant { message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(dataflow_scheduler::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(dataflow_scheduler::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;

    use super::*;

    #[test]
    fn test_cyclic_dependency_display() {
        let error = SchedulerError::CyclicDependency {
            src: "c".to_string(),
            dst: "a".to_string(),
            nodes: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "connecting 'c' to 'a' would create a circular dependency among [a, b, c]"
        );
    }

    #[test]
    fn test_self_dependency_display() {
        let error = SchedulerError::SelfDependency {
            name: "mixer".to_string(),
        };

        assert_eq!(error.to_string(), "component 'mixer' cannot depend on itself");
    }

    #[test]
    fn test_unknown_node_display() {
        let error = SchedulerError::UnknownNode {
            name: "missing".to_string(),
        };

        assert_eq!(error.to_string(), "unknown component 'missing'");
    }

    #[test]
    fn test_unknown_edge_display() {
        let error = SchedulerError::UnknownEdge {
            src: "a".to_string(),
            dst: "b".to_string(),
        };

        assert_eq!(error.to_string(), "no connection from 'a' to 'b'");
    }

    #[test]
    fn test_internal_invariant_display() {
        let error = SchedulerError::InternalInvariant {
            message: "loop without a controller: [a, b]".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "internal invariant violated: loop without a controller: [a, b]"
        );
    }

    #[test]
    fn test_error_codes() {
        let error = SchedulerError::UnknownNode {
            name: "x".to_string(),
        };

        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json}").unwrap_err();
        let error: SchedulerError = json_err.into();

        match error {
            SchedulerError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }
}
