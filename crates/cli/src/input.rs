//! Reading a stepsheet from disk and reporting errors against it.

use anyhow::{bail, Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use stepsheet_compiler::CompileError;
use stepsheet_parser::{
    parse_with_options, ErrorReporter, ParseOptions, RowSource, SemanticError, Severity,
    SyntaxTree, DEFAULT_DELIMITER,
};

/// A loaded and parsed input file.
pub struct Sheet {
    pub path: PathBuf,
    pub text: String,
    pub source: RowSource,
    pub tree: SyntaxTree,
}

impl Sheet {
    /// Read and parse `path`. Parse errors are reported to stderr.
    pub fn load(path: &Path, delimiter: Option<char>, options: &ParseOptions) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let delimiter = delimiter_for(path, delimiter)?;
        let source = RowSource::from_delimited(&text, delimiter)
            .with_context(|| format!("failed to read rows from {}", path.display()))?;
        tracing::debug!(path = %path.display(), rows = source.len(), "read input");

        let tree = match parse_with_options(&source, options) {
            Ok(tree) => tree,
            Err(error) => {
                reporter(path, &text).report_parse_error(&error)?;
                bail!("could not parse {}", path.display());
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            text,
            source,
            tree,
        })
    }

    pub fn reporter(&self) -> ErrorReporter<'_> {
        reporter(&self.path, &self.text)
    }

    /// Report a compile error against the row it names.
    pub fn report_compile_error(&self, error: &CompileError) -> Result<()> {
        let span = self
            .source
            .rows()
            .iter()
            .find(|row| row.line == error.line())
            .map(|row| row.span.clone());

        let finding = SemanticError {
            message: error.to_string(),
            span,
            line: error.line(),
            severity: Severity::Error,
            hint: None,
        };
        self.reporter().report_semantic_error(&finding)?;
        Ok(())
    }
}

fn reporter<'a>(path: &Path, text: &'a str) -> ErrorReporter<'a> {
    ErrorReporter::new(path.display().to_string(), text)
        .with_color(std::io::stderr().is_terminal())
}

/// The explicit delimiter, or `,` for `.csv` files and TAB otherwise.
fn delimiter_for(path: &Path, explicit: Option<char>) -> Result<u8> {
    match explicit {
        Some(c) if c.is_ascii() => Ok(c as u8),
        Some(c) => bail!("delimiter must be a single ASCII character, got '{}'", c),
        None => {
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            Ok(if is_csv { b',' } else { DEFAULT_DELIMITER })
        }
    }
}
