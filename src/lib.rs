//! # stepsheet
//!
//! Compile tabular test-step sheets into flat test case tables.
//!
//! ## Crates
//!
//! | Feature | Crate | Description |
//! |---------|-------|-------------|
//! | *(always)* | [`stepsheet-parser`](parser) | Row source, syntax tree, templates, serializer, lints |
//! | *(always)* | [`stepsheet-compiler`](compiler) | Call expansion, placeholder rendering, table export |
//! | `graph` | [`stepsheet-graph`](graph) | Call graph, cycle detection, dead functions |
//!
//! `default = ["graph"]`.
//!
//! ## Quick Start
//!
//! ```rust
//! use stepsheet::{compile, parse, RowSource};
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
//! ```

pub use stepsheet_compiler as compiler;
pub use stepsheet_parser as parser;

pub use stepsheet_compiler::{
    compile, compile_with_options, CompileError, CompileOptions, Compilation, CompiledSuite,
};
pub use stepsheet_parser::{
    parse, parse_with_options, serialize, serialize_tsv, validate_tree, ParseError, ParseOptions,
    RowSource, SyntaxTree,
};

#[cfg(feature = "graph")]
pub use stepsheet_graph as graph;
