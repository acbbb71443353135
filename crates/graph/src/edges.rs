//! Edge types for the call graph.

use serde::{Deserialize, Serialize};

/// An edge from a caller to a function it expands.
///
/// A call whose target names several functions adds one edge per function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallEdge {
    Calls {
        /// 1-based line of the `call` row
        line: usize,
    },
}

impl CallEdge {
    pub fn label(&self) -> &'static str {
        match self {
            CallEdge::Calls { .. } => "calls",
        }
    }

    pub fn line(&self) -> usize {
        match self {
            CallEdge::Calls { line } => *line,
        }
    }
}
