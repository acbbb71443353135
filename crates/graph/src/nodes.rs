//! Node types for the call graph.

use serde::{Deserialize, Serialize};

/// A span in the source text (start, end byte offsets).
pub type Span = (usize, usize);

/// A node in the call graph: something that owns a steps block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallNode {
    /// A function declaration. Same-named declarations are separate nodes.
    Function {
        name: String,
        /// 1-based line of the `function` row
        line: usize,
        span: Span,
    },

    /// A test case within a suite
    TestCase {
        /// Owning suite name
        suite: String,
        name: String,
        /// 1-based line of the `test case` row
        line: usize,
        span: Span,
    },
}

impl CallNode {
    /// Get a human-readable label for this node.
    pub fn label(&self) -> String {
        match self {
            CallNode::Function { name, .. } => format!("function:{}", name),
            CallNode::TestCase { suite, name, .. } => format!("test_case:{}:{}", suite, name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CallNode::Function { name, .. } | CallNode::TestCase { name, .. } => name,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            CallNode::Function { line, .. } | CallNode::TestCase { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CallNode::Function { span, .. } | CallNode::TestCase { span, .. } => *span,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, CallNode::Function { .. })
    }

    pub fn is_test_case(&self) -> bool {
        matches!(self, CallNode::TestCase { .. })
    }
}
