//! Row source: the ordered table of text cells the reader consumes.
//!
//! A stepsheet is authored as a delimiter-separated table (TAB by default).
//! Reading normalizes it the way the reader expects:
//!
//! - missing cells read as empty strings (see [`Row::cell`])
//! - fully blank rows are dropped
//! - cell text is kept verbatim, no trimming
//!
//! # Example
//!
//! ```rust
//! use stepsheet_parser::RowSource;
//!
//! let text = "function\tsetup\n\tuser\tguest\n\n\t\t\nsteps\tlogin as {user}\tdashboard shown\n";
//! let source = RowSource::from_tsv(text).unwrap();
//!
//! assert_eq!(source.len(), 3);
//! assert_eq!(source.rows()[1].cell(1), "user");
//! assert_eq!(source.rows()[2].line, 5);
//! ```

use crate::ast::Span;
use crate::error::SourceError;

/// Field delimiter used when none is given.
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell texts in column order.
    pub cells: Vec<String>,
    /// 1-based line of the row in the source text.
    pub line: usize,
    /// Byte range of the row in the source text.
    pub span: Span,
}

impl Row {
    /// Create a row from its cells.
    pub fn new(cells: Vec<String>, line: usize, span: Span) -> Self {
        Self { cells, line, span }
    }

    /// The cell at `index`, or `""` past the end of the row.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// The first cell, which selects the grammar rule.
    pub fn keyword(&self) -> &str {
        self.cell(0)
    }

    /// Cells after the keyword and name, without trailing blanks.
    pub fn extras(&self) -> Vec<String> {
        let tail = self.cells.get(2..).unwrap_or(&[]);
        let len = tail
            .iter()
            .rposition(|cell| !cell.is_empty())
            .map_or(0, |i| i + 1);
        tail[..len].to_vec()
    }

    /// Whether every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

/// An ordered, read-only sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSource {
    rows: Vec<Row>,
}

impl RowSource {
    /// Read a TAB-separated table.
    pub fn from_tsv(text: &str) -> Result<Self, SourceError> {
        Self::from_delimited(text, DEFAULT_DELIMITER)
    }

    /// Read a table separated by `delimiter`.
    ///
    /// Quoting follows the usual CSV rules (`"` quotes a cell, `""` escapes a quote).
    pub fn from_delimited(text: &str, delimiter: u8) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record)? {
            let (start, line) = record
                .position()
                .map(|pos| (pos.byte() as usize, pos.line() as usize))
                .unwrap_or((0, rows.len() + 1));
            let end = line_end(text, start);

            let row = Row::new(record.iter().map(str::to_string).collect(), line, start..end);
            if !row.is_blank() {
                rows.push(row);
            }
        }

        tracing::debug!(rows = rows.len(), "read row source");
        Ok(Self { rows })
    }

    /// Build a source from in-memory rows.
    ///
    /// Blank rows are dropped. Lines and spans are those the rows would have
    /// if rendered by [`RowSource::to_text`].
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut offset = 0;
        let rows = rows
            .into_iter()
            .map(|cells| cells.into_iter().map(Into::into).collect::<Vec<String>>())
            .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .enumerate()
            .map(|(i, cells)| {
                let len = cells.join("\t").len();
                let row = Row::new(cells, i + 1, offset..offset + len);
                offset += len + 1;
                row
            })
            .collect();
        Self { rows }
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the source has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the rows as TAB-separated lines.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            text.push_str(&row.cells.join("\t"));
            text.push('\n');
        }
        text
    }
}

fn line_end(text: &str, start: usize) -> usize {
    let end = text
        .get(start..)
        .and_then(|rest| rest.find('\n'))
        .map_or(text.len(), |i| start + i);
    if end > start && text.as_bytes()[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}
