//! Serialization types for graph export.

use crate::{CallGraph, CallNode, GraphReport};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Serializable representation of a CallGraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRepr {
    pub nodes: Vec<NodeRepr>,
    pub edges: Vec<EdgeRepr>,
    pub functions: Vec<String>,
    pub test_cases: Vec<String>,
}

impl From<&CallGraph> for GraphRepr {
    fn from(graph: &CallGraph) -> Self {
        let inner = graph.inner();

        let nodes = inner
            .node_indices()
            .filter_map(|idx| graph.get_node(idx).map(NodeRepr::from))
            .collect();

        let edges = inner
            .edge_references()
            .map(|e| EdgeRepr {
                source: e.source().index(),
                target: e.target().index(),
                edge_type: e.weight().label().to_string(),
                line: e.weight().line(),
            })
            .collect();

        let functions = graph.function_names().map(|s| s.to_string()).collect();
        let test_cases = graph
            .test_case_nodes()
            .iter()
            .filter_map(|&idx| graph.get_node(idx))
            .map(|node| node.name().to_string())
            .collect();

        Self {
            nodes,
            edges,
            functions,
            test_cases,
        }
    }
}

/// Serializable representation of a CallNode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRepr {
    pub node_type: String,
    pub name: String,
    pub suite: Option<String>,
    pub line: usize,
    pub span_start: usize,
    pub span_end: usize,
}

impl From<&CallNode> for NodeRepr {
    fn from(node: &CallNode) -> Self {
        let (span_start, span_end) = node.span();
        let (node_type, suite) = match node {
            CallNode::Function { .. } => ("function", None),
            CallNode::TestCase { suite, .. } => ("test_case", Some(suite.clone())),
        };
        NodeRepr {
            node_type: node_type.to_string(),
            name: node.name().to_string(),
            suite,
            line: node.line(),
            span_start,
            span_end,
        }
    }
}

/// Serializable representation of a CallEdge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRepr {
    pub source: usize,
    pub target: usize,
    pub edge_type: String,
    pub line: usize,
}

/// A graph together with its validation report, as printed by `stepsheet graph`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub graph: GraphRepr,
    pub report: GraphReport,
}

impl CallGraph {
    /// Serialize the graph and its report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&GraphExport {
            graph: GraphRepr::from(self),
            report: self.validate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::tree;
    use crate::{CallGraph, GraphRepr};

    #[test]
    fn test_json_export() {
        let tree = tree(&[
            &["function", "f"],
            &["steps", "a", "b"],
            &["test suite", "S"],
            &["test case", "c"],
            &["call", "f"],
            &["call", "g"],
        ]);
        let graph = CallGraph::from_tree(&tree);

        let repr = GraphRepr::from(&graph);
        assert_eq!(repr.nodes.len(), 2);
        assert_eq!(repr.nodes[1].suite.as_deref(), Some("S"));
        assert_eq!(repr.edges[0].source, 1);
        assert_eq!(repr.edges[0].target, 0);
        assert_eq!(repr.edges[0].line, 5);

        let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();
        assert_eq!(json["graph"]["functions"][0], "f");
        assert_eq!(json["report"]["warnings"][0]["kind"], "unresolved_call");
        assert_eq!(json["report"]["warnings"][0]["target"], "g");
    }
}
