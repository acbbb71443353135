//! Error and issue types for the call graph.

use crate::nodes::Span;
use serde::Serialize;
use stepsheet_parser::{SemanticError, Severity};
use thiserror::Error;

/// A finding from analysing the call graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphIssue {
    /// Functions that call each other in a loop; compiling any caller of
    /// them fails.
    #[error("recursive calls: {}", .path.join(" -> "))]
    CallCycle {
        path: Vec<String>,
        line: usize,
        span: Span,
    },

    /// A call whose target names no function, including an empty target.
    /// It expands to nothing.
    #[error("'{caller}' calls '{target}', which is not declared")]
    UnresolvedCall {
        target: String,
        caller: String,
        line: usize,
        span: Span,
    },

    /// Several functions share a name. A call to it expands all of them.
    #[error("function '{name}' is declared {} times (lines {})", .lines.len(), join_lines(.lines))]
    DuplicateFunction {
        name: String,
        lines: Vec<usize>,
        span: Span,
    },

    #[error("function '{name}' is never called")]
    UnusedFunction { name: String, line: usize, span: Span },
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl GraphIssue {
    pub fn severity(&self) -> Severity {
        match self {
            GraphIssue::CallCycle { .. } => Severity::Error,
            GraphIssue::UnresolvedCall { .. }
            | GraphIssue::DuplicateFunction { .. }
            | GraphIssue::UnusedFunction { .. } => Severity::Warning,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            GraphIssue::CallCycle { line, .. }
            | GraphIssue::UnresolvedCall { line, .. }
            | GraphIssue::UnusedFunction { line, .. } => *line,
            GraphIssue::DuplicateFunction { lines, .. } => lines.last().copied().unwrap_or(0),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            GraphIssue::CallCycle { span, .. }
            | GraphIssue::UnresolvedCall { span, .. }
            | GraphIssue::DuplicateFunction { span, .. }
            | GraphIssue::UnusedFunction { span, .. } => *span,
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            GraphIssue::CallCycle { .. } => {
                Some("break the loop; calls are expanded inline".to_string())
            }
            GraphIssue::UnresolvedCall { target, .. } if target.is_empty() => {
                Some("put a function name in the second cell of the call row".to_string())
            }
            GraphIssue::UnresolvedCall { .. } => {
                Some("the call expands to no rows unless compiled with --strict".to_string())
            }
            GraphIssue::DuplicateFunction { .. } => {
                Some("calls expand every declaration in order".to_string())
            }
            GraphIssue::UnusedFunction { .. } => None,
        }
    }
}

impl From<&GraphIssue> for SemanticError {
    fn from(issue: &GraphIssue) -> Self {
        let (start, end) = issue.span();
        SemanticError {
            message: issue.to_string(),
            span: Some(start..end),
            line: issue.line(),
            severity: issue.severity(),
            hint: issue.hint(),
        }
    }
}
