//! `function`, `test suite` and `test case` rows.

use super::steps::{merge_parameter, steps};
use super::ParseOptions;
use crate::ast::{Function, Spanned, TestCase, TestSuite};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::keyword::Keyword;
use crate::source::Row;

/// `function NAME`, then parameter rows, then an optional steps block.
pub(super) fn function<'a>(
    cursor: &mut Cursor<'a>,
    options: &ParseOptions,
    row: &'a Row,
) -> Result<Function> {
    let mut function = Function {
        name: row.cell(1).to_string(),
        ..Function::default()
    };

    while let Some(next) = cursor.peek() {
        match Keyword::classify(next.keyword()) {
            Keyword::Blank => {
                cursor.next();
                merge_parameter(&mut function.parameters, next, options.duplicate_keys)?;
            }
            Keyword::Steps => {
                cursor.next();
                function.steps = steps(cursor, options)?;
            }
            Keyword::Function
            | Keyword::Call
            | Keyword::TestSuite
            | Keyword::TestCase
            | Keyword::Unknown(_) => break,
        }
    }

    Ok(function)
}

/// `test suite NAME COLUMN...`, then test cases.
pub(super) fn test_suite<'a>(
    cursor: &mut Cursor<'a>,
    options: &ParseOptions,
    row: &'a Row,
) -> Result<TestSuite> {
    let mut suite = TestSuite {
        name: row.cell(1).to_string(),
        extra_columns: row.extras(),
        test_cases: Vec::new(),
    };

    while let Some(next) = cursor.peek() {
        match Keyword::classify(next.keyword()) {
            Keyword::TestCase => {
                cursor.next();
                let case = test_case(cursor, options, next)?;
                suite
                    .test_cases
                    .push(Spanned::new(case, next.span.clone(), next.line));
            }
            _ => break,
        }
    }

    Ok(suite)
}

/// `test case NAME VALUE...`, then a steps block.
///
/// Unlike a function, the block may open directly with a blank step row or
/// a call, without a `steps` row.
fn test_case<'a>(cursor: &mut Cursor<'a>, options: &ParseOptions, row: &'a Row) -> Result<TestCase> {
    let mut case = TestCase {
        name: row.cell(1).to_string(),
        extra_values: row.extras(),
        ..TestCase::default()
    };

    while let Some(keyword) = cursor.peek_keyword() {
        if !keyword.continues_steps() {
            break;
        }
        cursor.next();
        case.steps = steps(cursor, options)?;
    }

    Ok(case)
}
