//! Error types and error reporting for stepsheets.
//!
//! This module provides the reader's error types and pretty error reporting
//! using the [ariadne](https://crates.io/crates/ariadne) crate, pointing at
//! the offending row of the source table.
//!
//! # Error Types
//!
//! - [`SourceError`] - The delimited input could not be read
//! - [`ParseError`] - The rows do not follow the grammar
//! - [`SemanticError`](crate::validation::SemanticError) - Lint findings on a parsed tree
//!
//! # Pretty Printing
//!
//! ```rust
//! use stepsheet_parser::{parse, ErrorReporter, RowSource};
//!
//! let text = "function\tf\n\tuser\tguest\nbogus\tx\n";
//! let source = RowSource::from_tsv(text).unwrap();
//! let error = parse(&source).unwrap_err();
//!
//! let reporter = ErrorReporter::new("sheet.tsv", text).with_color(false);
//! let mut out = Vec::new();
//! reporter.write_parse_error(&error, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("bogus"));
//! ```

use crate::ast::Span;
use crate::validation::{SemanticError, Severity};
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::io;
use thiserror::Error;

/// The delimited input could not be read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed row source: {0}")]
    Csv(#[from] csv::Error),
}

/// The rows do not follow the stepsheet grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A top-level row starts with something other than `function` or `test suite`.
    #[error("Error when compiling line {line}: unexpected keyword '{keyword}' in row {cells:?}")]
    Syntax {
        keyword: String,
        cells: Vec<String>,
        line: usize,
        span: Span,
    },

    /// A top-level declaration consumed no rows beyond its own.
    #[error("reader cycled without advancing at line {line}: {cells:?}")]
    Internal {
        cells: Vec<String>,
        line: usize,
        span: Span,
    },

    /// A parameter name repeated under [`DuplicateKeyPolicy::Reject`](crate::DuplicateKeyPolicy::Reject).
    #[error("parameter '{name}' is declared more than once (line {line})")]
    DuplicateParameter { name: String, line: usize, span: Span },
}

impl ParseError {
    /// 1-based line of the offending row.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. }
            | ParseError::Internal { line, .. }
            | ParseError::DuplicateParameter { line, .. } => *line,
        }
    }

    /// Byte range of the offending row.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::Internal { span, .. }
            | ParseError::DuplicateParameter { span, .. } => span.clone(),
        }
    }

    /// Short label for the row, used under the source snippet.
    fn label(&self) -> String {
        match self {
            ParseError::Syntax { keyword, .. } => {
                format!("'{}' is not a top-level keyword", keyword)
            }
            ParseError::Internal { .. } => "nothing follows this declaration".to_string(),
            ParseError::DuplicateParameter { name, .. } => format!("'{}' repeated here", name),
        }
    }

    fn note(&self) -> Option<&'static str> {
        match self {
            ParseError::Syntax { .. } => Some("expected one of: function, test suite"),
            ParseError::Internal { .. } => Some("a function needs parameter or steps rows, a test suite needs test cases"),
            ParseError::DuplicateParameter { .. } => None,
        }
    }
}

/// Error reporter that uses ariadne for pretty error output.
pub struct ErrorReporter<'src> {
    source_name: String,
    source: &'src str,
    color: bool,
}

impl<'src> ErrorReporter<'src> {
    /// Create a new error reporter.
    pub fn new(source_name: impl Into<String>, source: &'src str) -> Self {
        Self {
            source_name: source_name.into(),
            source,
            color: true,
        }
    }

    /// Enable or disable ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Report a parse error to stderr.
    pub fn report_parse_error(&self, error: &ParseError) -> io::Result<()> {
        self.write_parse_error(error, io::stderr())
    }

    /// Report a semantic error or warning to stderr.
    pub fn report_semantic_error(&self, error: &SemanticError) -> io::Result<()> {
        self.write_semantic_error(error, io::stderr())
    }

    /// Write a parse error report.
    pub fn write_parse_error(&self, error: &ParseError, out: impl io::Write) -> io::Result<()> {
        let span = self.clamp(error.span());

        let mut report = Report::build(ReportKind::Error, &self.source_name, span.start)
            .with_config(self.config())
            .with_message(error.to_string())
            .with_label(
                Label::new((&self.source_name, span))
                    .with_color(Color::Red)
                    .with_message(error.label()),
            );

        if let Some(note) = error.note() {
            report = report.with_note(note);
        }

        report
            .finish()
            .write((&self.source_name, Source::from(self.source)), out)
    }

    /// Write a semantic error or warning report.
    pub fn write_semantic_error(
        &self,
        error: &SemanticError,
        out: impl io::Write,
    ) -> io::Result<()> {
        let span = self.clamp(error.span.clone().unwrap_or(0..0));
        let (kind, color) = match error.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };

        let mut report = Report::build(kind, &self.source_name, span.start)
            .with_config(self.config())
            .with_message(&error.message)
            .with_label(
                Label::new((&self.source_name, span))
                    .with_color(color)
                    .with_message("here"),
            );

        if let Some(ref hint) = error.hint {
            report = report.with_help(hint);
        }

        report
            .finish()
            .write((&self.source_name, Source::from(self.source)), out)
    }

    /// Row spans are byte offsets into the source text.
    fn config(&self) -> Config {
        Config::default()
            .with_color(self.color)
            .with_index_type(IndexType::Byte)
    }

    /// Keep spans inside the source so in-memory rows never index past it.
    fn clamp(&self, span: Span) -> Span {
        let len = self.source.len();
        span.start.min(len)..span.end.min(len)
    }
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, ParseError>;
