//! Error types for compiling and exporting.

use thiserror::Error;

/// Compiling a syntax tree failed. No suites are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A step template names a placeholder with no bound value.
    #[error("missing value for placeholder '{{{placeholder}}}' in \"{template}\" ({within}, line {line})")]
    MissingBinding {
        placeholder: String,
        template: String,
        /// Where the step was expanded, e.g. `function 'setup'`.
        within: String,
        line: usize,
    },

    /// A step template does not follow the placeholder grammar.
    #[error("invalid template \"{template}\" ({within}, line {line}): {message}")]
    Template {
        template: String,
        message: String,
        within: String,
        line: usize,
    },

    /// A call names no declared function (only with `UnresolvedCallPolicy::Reject`).
    #[error("call to undeclared function '{target}' at line {line}")]
    UnresolvedCall { target: String, line: usize },

    /// A call names several functions (only with `DuplicateFunctionPolicy::Reject`).
    #[error("call to '{target}' at line {line} is ambiguous: {count} functions share that name")]
    DuplicateFunction {
        target: String,
        count: usize,
        line: usize,
    },

    /// A function calls itself, directly or through other functions.
    #[error("recursive call: {}", .chain.join(" -> "))]
    CallCycle { chain: Vec<String>, line: usize },

    /// Calls nest deeper than the configured limit.
    #[error("calls nested deeper than {limit}: {}", .chain.join(" -> "))]
    RecursionLimit {
        limit: usize,
        chain: Vec<String>,
        line: usize,
    },
}

impl CompileError {
    /// 1-based line of the row being expanded when the error occurred.
    pub fn line(&self) -> usize {
        match self {
            CompileError::MissingBinding { line, .. }
            | CompileError::Template { line, .. }
            | CompileError::UnresolvedCall { line, .. }
            | CompileError::DuplicateFunction { line, .. }
            | CompileError::CallCycle { line, .. }
            | CompileError::RecursionLimit { line, .. } => *line,
        }
    }
}

/// Writing a compiled suite failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write delimited output: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
