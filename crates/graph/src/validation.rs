//! Validation and analysis of call graphs.

use crate::error::GraphIssue;
use crate::nodes::CallNode;
use crate::CallGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use serde::Serialize;

/// Result of validating a call graph.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GraphReport {
    /// Issues that make compilation fail
    pub errors: Vec<GraphIssue>,
    /// Issues that compile, but probably not as intended
    pub warnings: Vec<GraphIssue>,
}

impl GraphReport {
    /// Check if validation passed (no errors).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Get all issues (errors first).
    pub fn all_issues(&self) -> impl Iterator<Item = &GraphIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

impl CallGraph {
    /// Run every analysis.
    pub fn validate(&self) -> GraphReport {
        let mut report = GraphReport::default();

        report.errors.extend(self.find_cycles());

        report.warnings.extend(self.unresolved_calls.iter().cloned());
        report.warnings.extend(self.find_duplicate_functions());
        report.warnings.extend(self.find_unused_functions());

        report
    }

    /// Find loops of functions calling each other, including self-calls.
    ///
    /// Each cycle is reported once, as the path of function names through
    /// it in declaration order, closed by repeating the first name.
    pub fn find_cycles(&self) -> Vec<GraphIssue> {
        let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .collect();

        for scc in &mut cycles {
            scc.sort();
        }
        cycles.sort();

        cycles
            .into_iter()
            .map(|scc| {
                let first = &self.graph[scc[0]];
                let mut path: Vec<String> =
                    scc.iter().map(|&idx| self.graph[idx].name().to_string()).collect();
                path.push(first.name().to_string());

                GraphIssue::CallCycle {
                    path,
                    line: first.line(),
                    span: first.span(),
                }
            })
            .collect()
    }

    /// Find function names declared more than once.
    pub fn find_duplicate_functions(&self) -> Vec<GraphIssue> {
        self.functions
            .iter()
            .filter(|(_, nodes)| nodes.len() > 1)
            .filter_map(|(name, nodes)| {
                let lines = nodes.iter().map(|&idx| self.graph[idx].line()).collect();
                let last = nodes.last()?;
                Some(GraphIssue::DuplicateFunction {
                    name: name.clone(),
                    lines,
                    span: self.graph[*last].span(),
                })
            })
            .collect()
    }

    /// Find functions that no call reaches.
    pub fn find_unused_functions(&self) -> Vec<GraphIssue> {
        self.functions
            .values()
            .flatten()
            .filter(|&&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .filter_map(|&idx| match &self.graph[idx] {
                CallNode::Function { name, line, span } => Some(GraphIssue::UnusedFunction {
                    name: name.clone(),
                    line: *line,
                    span: *span,
                }),
                CallNode::TestCase { .. } => None,
            })
            .collect()
    }
}
