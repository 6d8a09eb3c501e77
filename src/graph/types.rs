//! Read-only views over the dependency graph
//!
//! Small data structures handed out by accessors; the graph itself stays
//! encapsulated.

/// One directed edge and its live connection count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeInfo {
    pub src: String,
    pub dst: String,
    pub ref_count: u32,
}

impl std::fmt::Display for EdgeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} (x{})", self.src, self.dst, self.ref_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_info_display() {
        let info = EdgeInfo {
            src: "a".to_string(),
            dst: "b".to_string(),
            ref_count: 3,
        };

        assert_eq!(info.to_string(), "a -> b (x3)");
    }
}
