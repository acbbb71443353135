//! # stepsheet-graph
//!
//! Call graph analysis for parsed stepsheets.
//!
//! Functions and test cases become nodes; every `call` row becomes an edge
//! from its owner to each function with the target name. The graph answers
//! questions the row-by-row compiler only discovers mid-expansion:
//!
//! - **Cycle Detection**: functions that call each other in a loop
//! - **Unresolved Calls**: calls that silently expand to nothing
//! - **Duplicates**: function names declared more than once
//! - **Dead Code Detection**: functions nothing calls
//! - **Usage Queries**: callers, callees and the functions a test case uses
//!
//! ## Example
//!
//! ```rust
//! use stepsheet_graph::CallGraph;
//! use stepsheet_parser::{parse, RowSource};
//!
//! let text = "\
//! function\tping
//! steps\tping\tok
//! call\tpong
//! test suite\tS
//! test case\tc
//! call\tping
//! ";
//! let tree = parse(&RowSource::from_tsv(text).unwrap()).unwrap();
//! let graph = CallGraph::from_tree(&tree);
//!
//! let report = graph.validate();
//! assert!(report.is_ok());
//! assert_eq!(report.warnings.len(), 1); // pong is not declared
//! ```

mod builder;
mod edges;
mod error;
pub mod export;
mod nodes;
mod queries;
mod validation;

pub use builder::CallGraphBuilder;
pub use edges::CallEdge;
pub use error::GraphIssue;
pub use export::{EdgeRepr, GraphExport, GraphRepr, NodeRepr};
pub use nodes::{CallNode, Span};
pub use validation::GraphReport;

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use stepsheet_parser::SyntaxTree;

/// A call graph built from a stepsheet syntax tree.
#[derive(Debug)]
pub struct CallGraph {
    /// The underlying directed graph
    graph: DiGraph<CallNode, CallEdge>,

    /// Function nodes by name, in declaration order
    functions: IndexMap<String, Vec<NodeIndex>>,

    /// Test case nodes in declaration order
    test_cases: Vec<NodeIndex>,

    /// Calls whose target could not be resolved during build
    unresolved_calls: Vec<GraphIssue>,
}

impl CallGraph {
    /// Build a call graph from a parsed syntax tree.
    pub fn from_tree(tree: &SyntaxTree) -> Self {
        CallGraphBuilder::new().build(tree)
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn inner(&self) -> &DiGraph<CallNode, CallEdge> {
        &self.graph
    }

    pub fn get_node(&self, index: NodeIndex) -> Option<&CallNode> {
        self.graph.node_weight(index)
    }

    /// Every node declared with the given function name.
    pub fn get_functions(&self, name: &str) -> &[NodeIndex] {
        self.functions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a test case node by suite and case name.
    pub fn get_test_case(&self, suite: &str, name: &str) -> Option<NodeIndex> {
        self.test_cases.iter().copied().find(|&idx| {
            matches!(
                &self.graph[idx],
                CallNode::TestCase { suite: s, name: n, .. } if s == suite && n == name
            )
        })
    }

    /// Distinct function names in declaration order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|s| s.as_str())
    }

    pub fn test_case_nodes(&self) -> &[NodeIndex] {
        &self.test_cases
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
