//! Steps blocks, calls and parameter rows.

use super::{DuplicateKeyPolicy, ParseOptions};
use crate::ast::{Call, Params, Spanned, Step, StepItem, Steps};
use crate::cursor::Cursor;
use crate::error::{ParseError, Result};
use crate::keyword::Keyword;
use crate::source::Row;

/// A steps block.
///
/// The caller has already taken the row that opened the block. That row is
/// also the block's first item, so it is pushed back and re-read here.
pub(super) fn steps<'a>(cursor: &mut Cursor<'a>, options: &ParseOptions) -> Result<Steps> {
    cursor.back();
    let mut block = Steps::default();

    while let Some(row) = cursor.peek() {
        let item = match Keyword::classify(row.keyword()) {
            Keyword::Blank | Keyword::Steps => {
                cursor.next();
                StepItem::Step(step(row))
            }
            Keyword::Call => {
                cursor.next();
                StepItem::Call(call(cursor, options, row)?)
            }
            Keyword::Function | Keyword::TestSuite | Keyword::TestCase | Keyword::Unknown(_) => {
                break
            }
        };
        block
            .items
            .push(Spanned::new(item, row.span.clone(), row.line));
    }

    Ok(block)
}

fn step(row: &Row) -> Step {
    Step {
        text: row.cell(1).to_string(),
        expected: row.cell(2).to_string(),
    }
}

/// `call TARGET`, then parameter rows.
fn call<'a>(cursor: &mut Cursor<'a>, options: &ParseOptions, row: &'a Row) -> Result<Call> {
    let mut call = Call {
        target: row.cell(1).to_string(),
        parameters: Params::new(),
    };

    while let Some(next) = cursor.peek() {
        if Keyword::classify(next.keyword()) != Keyword::Blank {
            break;
        }
        cursor.next();
        merge_parameter(&mut call.parameters, next, options.duplicate_keys)?;
    }

    Ok(call)
}

/// Add the `NAME VALUE` pair of a parameter row.
pub(super) fn merge_parameter(
    params: &mut Params,
    row: &Row,
    policy: DuplicateKeyPolicy,
) -> Result<()> {
    let name = row.cell(1);
    let value = row.cell(2);

    match policy {
        DuplicateKeyPolicy::LastWins => {
            params.insert(name.to_string(), value.to_string());
        }
        DuplicateKeyPolicy::FirstWins => {
            params
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        DuplicateKeyPolicy::Reject => {
            if params.contains_key(name) {
                return Err(ParseError::DuplicateParameter {
                    name: name.to_string(),
                    line: row.line,
                    span: row.span.clone(),
                });
            }
            params.insert(name.to_string(), value.to_string());
        }
    }

    Ok(())
}
