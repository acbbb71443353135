//! Compiler configuration.
//!
//! The defaults reproduce the established behavior of stepsheets: unresolved
//! calls expand to nothing, same-named functions all expand in declaration
//! order, and a callee sees only the parameters its call passes.

/// What a call to an undeclared function does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedCallPolicy {
    /// The call contributes no rows.
    #[default]
    Ignore,
    /// The call is a [`CompileError::UnresolvedCall`](crate::CompileError::UnresolvedCall).
    Reject,
}

/// What a call does when several functions share its target name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateFunctionPolicy {
    /// Every match expands, in declaration order, and the rows are concatenated.
    #[default]
    Concatenate,
    /// Only the first declaration expands.
    FirstOnly,
    /// The call is a [`CompileError::DuplicateFunction`](crate::CompileError::DuplicateFunction).
    Reject,
}

/// Which values a callee's templates are rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingPolicy {
    /// Only the call's own parameters.
    #[default]
    CallOnly,
    /// The function's declared parameters, overridden by the call's.
    WithDefaults,
}

/// Default limit on nested calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub unresolved_calls: UnresolvedCallPolicy,
    pub duplicate_functions: DuplicateFunctionPolicy,
    pub bindings: BindingPolicy,
    /// Deepest chain of nested calls allowed before [`CompileError::RecursionLimit`](crate::CompileError::RecursionLimit).
    pub max_call_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            unresolved_calls: UnresolvedCallPolicy::default(),
            duplicate_functions: DuplicateFunctionPolicy::default(),
            bindings: BindingPolicy::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl CompileOptions {
    /// Options that reject unresolved calls and ambiguous function names.
    pub fn strict() -> Self {
        Self {
            unresolved_calls: UnresolvedCallPolicy::Reject,
            duplicate_functions: DuplicateFunctionPolicy::Reject,
            ..Self::default()
        }
    }

    pub fn with_bindings(mut self, bindings: BindingPolicy) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
