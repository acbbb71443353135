//! # stepsheet-parser
//!
//! Reader for stepsheets: tables of rows that declare reusable test
//! *functions* and *test suites*.
//!
//! A stepsheet has no indentation; each row's first cell (the *keyword*)
//! says what the row is, and the rows that follow it belong to it until a
//! row with a keyword it does not accept. This crate provides:
//!
//! - **Row source reading** of delimiter-separated tables ([`RowSource`])
//! - **Parsing** into a typed syntax tree ([`SyntaxTree`])
//! - **Templates** with `{name}` placeholders ([`template`])
//! - **Serialization** back into canonical rows ([`serialize`])
//! - **Validation** lints ([`validate_tree`])
//!
//! ## Quick Start
//!
//! ```rust
//! use stepsheet_parser::{parse, ast::Declaration, RowSource};
//!
//! let text = "\
//! function\tsetup
//! \tuser\tguest
//! steps\tlogin as {user}\tdashboard shown
//! test suite\tLogin
//! test case\tbasic
//! call\tsetup
//! \tuser\talice
//! ";
//!
//! let source = RowSource::from_tsv(text).unwrap();
//! let tree = parse(&source).unwrap();
//!
//! for decl in &tree.declarations {
//!     match &decl.node {
//!         Declaration::Function(f) => println!("function {} ({} steps)", f.name, f.steps.len()),
//!         Declaration::TestSuite(s) => println!("suite {} ({} cases)", s.name, s.test_cases.len()),
//!     }
//! }
//! ```
//!
//! ## Keywords
//!
//! | Keyword | Row | Followed by |
//! |---------|-----|-------------|
//! | `function` | `function NAME` | parameter rows, then `steps` |
//! | `steps` | `steps TEXT EXPECTED` | more step or call rows |
//! | *(blank)* | `"" NAME VALUE` or `"" TEXT EXPECTED` | parameter or step, by context |
//! | `call` | `call TARGET` | parameter rows |
//! | `test suite` | `test suite NAME COLUMN...` | `test case` rows |
//! | `test case` | `test case NAME VALUE...` | a steps block |
//!
//! ## Error Handling
//!
//! ```rust
//! use stepsheet_parser::{parse, ParseError, RowSource};
//!
//! let source = RowSource::from_tsv("steps\torphan\tstep\n").unwrap();
//! match parse(&source) {
//!     Err(ParseError::Syntax { line, keyword, .. }) => {
//!         assert_eq!(line, 1);
//!         assert_eq!(keyword, "steps");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod ast;
pub mod cursor;
pub mod error;
pub mod keyword;
pub mod parser;
pub mod serializer;
pub mod source;
pub mod template;
pub mod validation;

// Re-export commonly used types
pub use ast::{Params, Spanned, SyntaxTree};
pub use cursor::Cursor;
pub use error::{ErrorReporter, ParseError, SourceError};
pub use keyword::Keyword;
pub use parser::{parse, parse_with_options, DuplicateKeyPolicy, ParseOptions};
pub use serializer::{serialize, serialize_tsv};
pub use source::{Row, RowSource, DEFAULT_DELIMITER};
pub use template::{Template, TemplateError};
pub use validation::{validate_tree, SemanticError, Severity};

/// Read TAB-separated text and parse it.
///
/// Returns the row source alongside the tree; the rows are needed to report
/// errors against the text.
pub fn parse_tsv(text: &str) -> Result<(RowSource, SyntaxTree), Box<dyn std::error::Error>> {
    let source = RowSource::from_tsv(text)?;
    let tree = parse(&source)?;
    Ok((source, tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let (source, tree) = parse_tsv("function\tnoop\nsteps\twait\tok\n").unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(tree.functions().count(), 1);
    }

    #[test]
    fn test_reporter_renders_syntax_error() {
        let text = "function\tf\nsteps\ta\tb\nbanana\tsplit\n";
        let source = RowSource::from_tsv(text).unwrap();
        let error = parse(&source).unwrap_err();

        let mut out = Vec::new();
        ErrorReporter::new("sheet.tsv", text)
            .with_color(false)
            .write_parse_error(&error, &mut out)
            .unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.contains("line 3"));
        assert!(rendered.contains("sheet.tsv"));
        assert!(rendered.contains("expected one of: function, test suite"));
    }
}
