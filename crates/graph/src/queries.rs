//! Query operations on the call graph.

use crate::nodes::CallNode;
use crate::CallGraph;
use indexmap::IndexSet;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

impl CallGraph {
    /// Names of the functions `function` calls directly, in call order,
    /// without repeats.
    pub fn callees_of(&self, function: &str) -> Vec<&str> {
        let mut callees = IndexSet::new();
        for &idx in self.get_functions(function) {
            callees.extend(self.outgoing(idx).map(|target| self.graph[target].name()));
        }
        callees.into_iter().collect()
    }

    /// Every function and test case that calls `function` directly.
    pub fn callers_of(&self, function: &str) -> Vec<&CallNode> {
        let mut callers = IndexSet::new();
        for &idx in self.get_functions(function) {
            let mut incoming: Vec<_> = self
                .graph
                .edges_directed(idx, Direction::Incoming)
                .map(|e| (e.weight().line(), e.source()))
                .collect();
            incoming.sort();
            callers.extend(incoming.into_iter().map(|(_, source)| source));
        }
        callers.into_iter().map(|idx| &self.graph[idx]).collect()
    }

    /// Names of every function a test case expands, directly or through
    /// other functions, in first-use order.
    pub fn functions_used_by(&self, suite: &str, case: &str) -> Vec<&str> {
        let Some(start) = self.get_test_case(suite, case) else {
            return Vec::new();
        };

        let mut seen = IndexSet::new();
        let mut used = IndexSet::new();
        let mut stack = vec![start];

        while let Some(idx) = stack.pop() {
            if !seen.insert(idx) {
                continue;
            }
            if idx != start {
                used.insert(self.graph[idx].name());
            }
            // reversed so the first call is visited first
            let mut next: Vec<_> = self.outgoing(idx).collect();
            next.reverse();
            stack.extend(next);
        }

        used.into_iter().collect()
    }

    /// Targets of a node's call edges, in call order.
    fn outgoing(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.weight().line(), e.target()))
            .collect();
        edges.sort();
        edges.into_iter().map(|(_, target)| target)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::tree;
    use crate::CallGraph;
    use pretty_assertions::assert_eq;

    fn sheet() -> CallGraph {
        let tree = tree(&[
            &["function", "open"],
            &["steps", "open", "ok"],
            &["function", "search"],
            &["steps", "search", "ok"],
            &["call", "open"],
            &["function", "checkout"],
            &["steps", "pay", "ok"],
            &["call", "search"],
            &["call", "open"],
            &["test suite", "Shop"],
            &["test case", "buy"],
            &["call", "checkout"],
            &["test case", "browse"],
            &["call", "open"],
        ]);
        CallGraph::from_tree(&tree)
    }

    #[test]
    fn test_callees_of() {
        let graph = sheet();
        assert_eq!(graph.callees_of("checkout"), vec!["search", "open"]);
        assert_eq!(graph.callees_of("open"), Vec::<&str>::new());
        assert_eq!(graph.callees_of("missing"), Vec::<&str>::new());
    }

    #[test]
    fn test_callers_of() {
        let graph = sheet();
        let callers: Vec<String> = graph.callers_of("open").iter().map(|n| n.label()).collect();
        assert_eq!(
            callers,
            vec![
                "function:search",
                "function:checkout",
                "test_case:Shop:browse",
            ]
        );
    }

    #[test]
    fn test_functions_used_by() {
        let graph = sheet();
        assert_eq!(
            graph.functions_used_by("Shop", "buy"),
            vec!["checkout", "search", "open"]
        );
        assert_eq!(graph.functions_used_by("Shop", "browse"), vec!["open"]);
        assert!(graph.functions_used_by("Shop", "nope").is_empty());
    }
}
