//! # stepsheet-compiler
//!
//! Turns a parsed stepsheet into flat test case tables.
//!
//! Every test suite in the [`SyntaxTree`](stepsheet_parser::SyntaxTree) is
//! compiled into a [`CompiledSuite`]: each test case becomes a list of
//! rendered `(step, expected)` rows, with every `call` replaced by the steps
//! of the function it names and every `{placeholder}` replaced by the value
//! the call passed for it.
//!
//! ```rust
//! use stepsheet_compiler::{compile, export::write_delimited};
//! use stepsheet_parser::{parse, RowSource};
//!
//! let text = "\
//! function\tsetup
//! steps\tlogin as {user}\tdashboard shown
//! test suite\tLogin
//! test case\tbasic
//! call\tsetup
//! \tuser\talice
//! ";
//!
//! let tree = parse(&RowSource::from_tsv(text).unwrap()).unwrap();
//! let compilation = compile(&tree).unwrap();
//! let suite = compilation.current_suite().unwrap();
//! assert_eq!(suite.test_cases[0].rows[0].step, "login as alice");
//!
//! let mut out = Vec::new();
//! write_delimited(suite, &mut out, b',').unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("Test Case,Step,Expected Result\n"));
//! ```
//!
//! Behavior for unresolved calls, same-named functions, parameter binding and
//! call depth is set through [`CompileOptions`].

pub mod compiled;
pub mod error;
pub mod expander;
pub mod export;
pub mod options;

pub use compiled::{Compilation, CompiledRow, CompiledSuite, CompiledTestCase};
pub use error::{CompileError, ExportError};
pub use expander::{compile, Compiler};
pub use export::{export_file_name, write_delimited, write_json, write_suite, ExportFormat, SuiteTable};
pub use options::{
    BindingPolicy, CompileOptions, DuplicateFunctionPolicy, UnresolvedCallPolicy,
    DEFAULT_MAX_CALL_DEPTH,
};

/// Compile every suite of `tree` with the given options.
pub fn compile_with_options(
    tree: &stepsheet_parser::SyntaxTree,
    options: CompileOptions,
) -> Result<Compilation, CompileError> {
    Compiler::new(tree, options).compile()
}
