//! Builder for constructing a CallGraph from a syntax tree.

use crate::edges::CallEdge;
use crate::error::GraphIssue;
use crate::nodes::{CallNode, Span};
use crate::CallGraph;
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use stepsheet_parser::ast::{Declaration, StepItem, Steps};
use stepsheet_parser::SyntaxTree;

/// Builder for constructing a call graph from a syntax tree.
#[derive(Default)]
pub struct CallGraphBuilder {
    graph: DiGraph<CallNode, CallEdge>,
    functions: IndexMap<String, Vec<NodeIndex>>,
    test_cases: Vec<NodeIndex>,
    unresolved_calls: Vec<GraphIssue>,
}

/// A steps block waiting for its call edges.
struct Owner<'t> {
    node: NodeIndex,
    steps: &'t Steps,
}

fn span_of(range: &std::ops::Range<usize>) -> Span {
    (range.start, range.end)
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a CallGraph from a syntax tree.
    pub fn build(mut self, tree: &SyntaxTree) -> CallGraph {
        // Phase 1: one node per function and test case
        let owners = self.add_nodes(tree);

        // Phase 2: call edges, now that every target is known
        for owner in &owners {
            self.add_call_edges(owner);
        }

        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            unresolved = self.unresolved_calls.len(),
            "built call graph"
        );

        CallGraph {
            graph: self.graph,
            functions: self.functions,
            test_cases: self.test_cases,
            unresolved_calls: self.unresolved_calls,
        }
    }

    fn add_nodes<'t>(&mut self, tree: &'t SyntaxTree) -> Vec<Owner<'t>> {
        let mut owners = Vec::new();

        for decl in &tree.declarations {
            match &decl.node {
                Declaration::Function(function) => {
                    let idx = self.graph.add_node(CallNode::Function {
                        name: function.name.clone(),
                        line: decl.line,
                        span: span_of(&decl.span),
                    });
                    self.functions
                        .entry(function.name.clone())
                        .or_default()
                        .push(idx);
                    owners.push(Owner {
                        node: idx,
                        steps: &function.steps,
                    });
                }
                Declaration::TestSuite(suite) => {
                    for case in &suite.test_cases {
                        let idx = self.graph.add_node(CallNode::TestCase {
                            suite: suite.name.clone(),
                            name: case.node.name.clone(),
                            line: case.line,
                            span: span_of(&case.span),
                        });
                        self.test_cases.push(idx);
                        owners.push(Owner {
                            node: idx,
                            steps: &case.node.steps,
                        });
                    }
                }
            }
        }

        owners
    }

    fn add_call_edges(&mut self, owner: &Owner<'_>) {
        for item in owner.steps.calls() {
            let StepItem::Call(call) = &item.node else {
                continue;
            };

            match self.functions.get(&call.target) {
                Some(targets) => {
                    for &target in targets {
                        self.graph
                            .add_edge(owner.node, target, CallEdge::Calls { line: item.line });
                    }
                }
                None => self.unresolved_calls.push(GraphIssue::UnresolvedCall {
                    target: call.target.clone(),
                    caller: self.graph[owner.node].name().to_string(),
                    line: item.line,
                    span: span_of(&item.span),
                }),
            }
        }
    }
}
