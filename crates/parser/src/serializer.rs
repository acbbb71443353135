//! Serializer - convert a syntax tree back into rows.
//!
//! This enables formatting tools and programmatic generation of stepsheets.
//! Re-reading the output yields an equal tree, apart from spans.
//!
//! # Example
//!
//! ```rust
//! use stepsheet_parser::{parse, serialize_tsv, RowSource};
//!
//! let source = RowSource::from_tsv("function\tf\n\tuser\tguest\nsteps\thi {user}\tok\n").unwrap();
//! let tree = parse(&source).unwrap();
//! let text = serialize_tsv(&tree).unwrap();
//! assert_eq!(text, "function\tf\n\tuser\tguest\nsteps\thi {user}\tok\n");
//! ```
//!
//! # Layout
//!
//! The serializer writes canonical rows:
//! - a step is written with keyword `steps` when it opens a block, follows a
//!   call (a blank row there would read as a call parameter) or is empty;
//!   other steps use a blank keyword
//! - every call is written with keyword `call`, followed by its parameter rows

use crate::ast::*;
use crate::error::SourceError;
use crate::keyword::Keyword;

/// Serialize a tree to rows of cells.
pub fn serialize(tree: &SyntaxTree) -> Vec<Vec<String>> {
    let mut w = Writer::default();
    for decl in &tree.declarations {
        match &decl.node {
            Declaration::Function(function) => w.write_function(function),
            Declaration::TestSuite(suite) => w.write_suite(suite),
        }
    }
    w.rows
}

/// Serialize a tree to TAB-separated text, quoting cells where needed.
pub fn serialize_tsv(tree: &SyntaxTree) -> Result<String, SourceError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(Vec::new());

    for row in serialize(tree) {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Default)]
struct Writer {
    rows: Vec<Vec<String>>,
}

impl Writer {
    fn row(&mut self, keyword: Keyword, cells: &[&str]) {
        let mut row = Vec::with_capacity(cells.len() + 1);
        row.push(keyword.as_str().to_string());
        row.extend(cells.iter().map(|c| c.to_string()));
        self.rows.push(row);
    }

    fn write_parameters(&mut self, params: &Params) {
        for (name, value) in params {
            self.row(Keyword::Blank, &[name, value]);
        }
    }

    fn write_function(&mut self, function: &Function) {
        self.row(Keyword::Function, &[&function.name]);
        self.write_parameters(&function.parameters);
        self.write_steps(&function.steps);
    }

    fn write_suite(&mut self, suite: &TestSuite) {
        let mut cells = vec![suite.name.as_str()];
        cells.extend(suite.extra_columns.iter().map(String::as_str));
        self.row(Keyword::TestSuite, &cells);

        for case in &suite.test_cases {
            let mut cells = vec![case.node.name.as_str()];
            cells.extend(case.node.extra_values.iter().map(String::as_str));
            self.row(Keyword::TestCase, &cells);
            self.write_steps(&case.node.steps);
        }
    }

    fn write_steps(&mut self, steps: &Steps) {
        let mut after_call = true;
        for item in &steps.items {
            match &item.node {
                StepItem::Step(step) => {
                    let empty = step.text.is_empty() && step.expected.is_empty();
                    let keyword = if after_call || empty {
                        Keyword::Steps
                    } else {
                        Keyword::Blank
                    };
                    self.row(keyword, &[&step.text, &step.expected]);
                    after_call = false;
                }
                StepItem::Call(call) => {
                    self.row(Keyword::Call, &[&call.target]);
                    self.write_parameters(&call.parameters);
                    after_call = true;
                }
            }
        }
    }
}
