use crate::scc::SccAnalyzer;

/// Guard for keeping a dependency graph acyclic
///
/// A pure function over a graph: no state beyond the analyzer it reuses.
#[derive(Debug)]
pub struct CycleGuard {
    analyzer: SccAnalyzer,
}

impl Default for CycleGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleGuard {
    /// Create a new cycle guard
    pub fn new() -> Self {
        Self {
            analyzer: SccAnalyzer::new(),
        }
    }

    /// Check that the given graph is a DAG.
    ///
    /// On failure returns the member sets of every strongly connected
    /// component of size > 1, in the analyzer's order.
    pub fn check(
        &self,
        nodes: &[String],
        edges: &[(String, String)],
    ) -> Result<(), Vec<Vec<String>>> {
        let partition = self.analyzer.analyze(nodes, edges);
        let loops: Vec<Vec<String>> = partition
            .loops()
            .map(|scc| scc.members().to_vec())
            .collect();

        if loops.is_empty() { Ok(()) } else { Err(loops) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn edges(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_dag_passes() {
        let guard = CycleGuard::new();
        let result = guard.check(
            &names(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("a", "c"), ("b", "c")]),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_graph_passes() {
        assert!(CycleGuard::new().check(&[], &[]).is_ok());
    }

    #[test]
    fn test_cycle_reports_all_members() {
        let guard = CycleGuard::new();
        let loops = guard
            .check(
                &names(&["a", "b", "c"]),
                &edges(&[("a", "b"), ("b", "c"), ("c", "a")]),
            )
            .unwrap_err();

        assert_eq!(loops.len(), 1);
        let mut members = loops[0].clone();
        members.sort();
        assert_eq!(members, names(&["a", "b", "c"]));
    }

    #[test]
    fn test_two_separate_cycles_reported_separately() {
        let guard = CycleGuard::new();
        let loops = guard
            .check(
                &names(&["a", "b", "x", "y"]),
                &edges(&[("a", "b"), ("b", "a"), ("x", "y"), ("y", "x")]),
            )
            .unwrap_err();

        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|members| members.len() == 2));
    }
}
