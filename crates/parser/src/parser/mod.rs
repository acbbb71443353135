//! Reader for stepsheet rows.
//!
//! This module turns a [`RowSource`] into a typed [`SyntaxTree`] by
//! recursive descent over the rows, keyed on each row's first cell.
//!
//! # Grammar
//!
//! ```text
//! sheet       := (function | test_suite)*
//! function    := "function" NAME  parameter*  steps?
//! test_suite  := "test suite" NAME EXTRA*  test_case*
//! test_case   := "test case" NAME EXTRA*  steps?
//! steps       := (step | call)+           ; opened by "steps", "" or "call"
//! step        := ("steps" | "") TEXT EXPECTED
//! call        := "call" TARGET  parameter*
//! parameter   := "" NAME VALUE
//! ```
//!
//! Every construct ends at the first row whose keyword it does not accept;
//! that row is left for the enclosing construct.
//!
//! # Usage
//!
//! ```rust
//! use stepsheet_parser::{parse, RowSource};
//!
//! let source = RowSource::from_rows(vec![
//!     vec!["function", "setup"],
//!     vec!["", "user", "guest"],
//!     vec!["steps", "login as {user}", "dashboard shown"],
//!     vec!["test suite", "Login"],
//!     vec!["test case", "basic"],
//!     vec!["call", "setup"],
//!     vec!["", "user", "alice"],
//! ]);
//!
//! let tree = parse(&source).unwrap();
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.suites().next().unwrap().test_cases.len(), 1);
//! ```
//!
//! # Module Structure
//!
//! - `declarations` - `function`, `test suite` and `test case` rows
//! - `steps` - steps blocks, calls and parameter rows

mod declarations;
mod steps;
#[cfg(test)]
mod tests;

use crate::ast::{Declaration, Spanned, SyntaxTree};
use crate::cursor::Cursor;
use crate::error::{ParseError, Result};
use crate::keyword::Keyword;
use crate::source::{Row, RowSource};

/// What to do when a parameter name repeats within one function or call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKeyPolicy {
    /// The later value replaces the earlier one.
    #[default]
    LastWins,
    /// The earlier value is kept.
    FirstWins,
    /// The repeat is a [`ParseError::DuplicateParameter`].
    Reject,
}

/// Reader configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl ParseOptions {
    /// Options that turn silent overwrites into errors.
    pub fn strict() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Reject,
        }
    }
}

/// Parse a row source with default options.
pub fn parse(source: &RowSource) -> Result<SyntaxTree> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse a row source.
pub fn parse_with_options(source: &RowSource, options: &ParseOptions) -> Result<SyntaxTree> {
    let mut cursor = Cursor::new(source.rows());
    let tree = drive(&mut cursor, |cursor, row| declaration(cursor, options, row))?;
    tracing::debug!(declarations = tree.len(), "parsed row source");
    Ok(tree)
}

/// Run the top-level loop with `dispatch` handling each declaration row.
///
/// `dispatch` receives the cursor positioned after the row it is given and
/// must consume at least one more row. If the cursor has not moved when it
/// returns, the loop stops with [`ParseError::Internal`] instead of
/// spinning. A declaration with no body therefore trips the guard.
pub fn drive<'a, F>(cursor: &mut Cursor<'a>, mut dispatch: F) -> Result<SyntaxTree>
where
    F: FnMut(&mut Cursor<'a>, &'a Row) -> Result<Declaration>,
{
    let mut declarations = Vec::new();

    while !cursor.is_eof() {
        let Some(row) = cursor.next() else {
            break;
        };
        let before = cursor.position();

        let node = dispatch(cursor, row)?;

        if cursor.position() <= before {
            return Err(ParseError::Internal {
                cells: row.cells.clone(),
                line: row.line,
                span: row.span.clone(),
            });
        }

        declarations.push(Spanned::new(node, row.span.clone(), row.line));
    }

    Ok(SyntaxTree { declarations })
}

/// Dispatch one top-level row.
fn declaration<'a>(
    cursor: &mut Cursor<'a>,
    options: &ParseOptions,
    row: &'a Row,
) -> Result<Declaration> {
    let node = match Keyword::classify(row.keyword()) {
        Keyword::Function => Declaration::Function(declarations::function(cursor, options, row)?),
        Keyword::TestSuite => {
            Declaration::TestSuite(declarations::test_suite(cursor, options, row)?)
        }
        keyword @ (Keyword::Blank
        | Keyword::Steps
        | Keyword::Call
        | Keyword::TestCase
        | Keyword::Unknown(_)) => {
            return Err(ParseError::Syntax {
                keyword: keyword.as_str().to_string(),
                cells: row.cells.clone(),
                line: row.line,
                span: row.span.clone(),
            });
        }
    };

    tracing::debug!(
        kind = node.keyword(),
        name = node.name(),
        line = row.line,
        "parsed declaration"
    );
    Ok(node)
}
