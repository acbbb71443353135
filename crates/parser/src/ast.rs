//! Syntax tree types for stepsheets.
//!
//! The root type is [`SyntaxTree`], the top-level declarations of one source
//! in source order:
//!
//! ```text
//! SyntaxTree
//! ├── Function (name, parameters, steps)
//! │   └── Steps
//! │       ├── Step (text template, expected template)
//! │       └── Call (target, parameters)
//! └── TestSuite (name, extra columns)
//!     └── TestCase (name, extra values)
//!         └── Steps
//! ```
//!
//! Declarations, test cases and step items are wrapped in [`Spanned`] so
//! diagnostics can point back at the row they came from.
//!
//! # Serialization
//!
//! All types implement `Serialize` and `Deserialize`:
//!
//! ```rust
//! use stepsheet_parser::{parse, RowSource};
//!
//! let source = RowSource::from_tsv("function\tnoop\nsteps\twait\tok\n").unwrap();
//! let tree = parse(&source).unwrap();
//! let json = serde_json::to_string(&tree).unwrap();
//! assert!(json.contains("noop"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A byte range in the source text.
pub type Span = Range<usize>;

/// Name to value mapping, in the order the rows declared it.
pub type Params = IndexMap<String, String>;

/// A value with the location of the row it was built from.
///
/// # Example
///
/// ```rust
/// use stepsheet_parser::Spanned;
///
/// let s = Spanned::new("login", 0..5, 1);
/// let upper = s.map(|t| t.to_uppercase());
/// assert_eq!(upper.node, "LOGIN");
/// assert_eq!(upper.line, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Byte range of the originating row.
    pub span: Span,
    /// 1-based line of the originating row.
    pub line: usize,
}

impl<T> Spanned<T> {
    /// Create a new spanned value.
    pub fn new(node: T, span: Span, line: usize) -> Self {
        Self { node, span, line }
    }

    /// Transform the inner value while keeping the location.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            node: f(self.node),
            span: self.span,
            line: self.line,
        }
    }
}

/// All top-level declarations of one source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub declarations: Vec<Spanned<Declaration>>,
}

impl SyntaxTree {
    /// All function declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> + '_ {
        self.declarations.iter().filter_map(|decl| match &decl.node {
            Declaration::Function(function) => Some(function),
            Declaration::TestSuite(_) => None,
        })
    }

    /// All test suite declarations in source order.
    pub fn suites(&self) -> impl Iterator<Item = &TestSuite> + '_ {
        self.declarations.iter().filter_map(|decl| match &decl.node {
            Declaration::TestSuite(suite) => Some(suite),
            Declaration::Function(_) => None,
        })
    }

    /// Every function whose name is `name`, in source order.
    pub fn functions_named<'t>(&'t self, name: &'t str) -> impl Iterator<Item = &'t Function> + 't {
        self.declarations.iter().filter_map(move |decl| match &decl.node {
            Declaration::Function(function) if function.name == name => Some(function),
            _ => None,
        })
    }

    /// Number of top-level declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the tree has no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Declaration {
    Function(Function),
    TestSuite(TestSuite),
}

impl Declaration {
    /// Name of the function or suite.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(function) => &function.name,
            Declaration::TestSuite(suite) => &suite.name,
        }
    }

    /// The keyword that introduces this declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            Declaration::Function(_) => "function",
            Declaration::TestSuite(_) => "test suite",
        }
    }
}

/// A reusable, parameterized sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// Declared parameters and their default values.
    pub parameters: Params,
    pub steps: Steps,
}

/// A named group of test cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    /// Header names of the passthrough columns.
    pub extra_columns: Vec<String>,
    pub test_cases: Vec<Spanned<TestCase>>,
}

/// One test case of a suite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    /// Passthrough values, positionally matching the suite's extra columns.
    pub extra_values: Vec<String>,
    pub steps: Steps,
}

/// An ordered block of literal steps and calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Steps {
    pub items: Vec<Spanned<StepItem>>,
}

impl Steps {
    /// Whether the block has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in the block.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The calls in this block, in order.
    pub fn calls(&self) -> impl Iterator<Item = &Spanned<StepItem>> + '_ {
        self.items
            .iter()
            .filter(|item| matches!(item.node, StepItem::Call(_)))
    }
}

/// One entry of a steps block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepItem {
    Step(Step),
    Call(Call),
}

/// A literal step. Both fields are templates with `{name}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub text: String,
    pub expected: String,
}

/// A call to every function named `target`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub target: String,
    pub parameters: Params,
}
