//! Writing compiled suites as tables.

use crate::compiled::CompiledSuite;
use crate::error::ExportError;
use serde::Serialize;
use std::fmt;
use std::io;
use std::str::FromStr;

/// Fixed leading columns of every exported table.
pub const BASE_COLUMNS: [&str; 3] = ["Test Case", "Step", "Expected Result"];

/// A compiled suite laid out as a header plus rows.
///
/// The first row of each test case carries its name and extra values; the
/// rows after it leave those cells empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SuiteTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

impl From<&CompiledSuite> for SuiteTable {
    fn from(suite: &CompiledSuite) -> Self {
        let header: Vec<String> = BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(suite.extra_columns.iter().cloned())
            .collect();
        let extras = suite.extra_columns.len();

        let mut rows = Vec::with_capacity(suite.row_count() + suite.test_cases.len());
        for case in &suite.test_cases {
            if case.extra_values.len() > extras {
                tracing::warn!(
                    suite = %suite.suite_name,
                    case = %case.name,
                    dropped = ?&case.extra_values[extras..],
                    "extra values past the last column are not exported"
                );
            }
            let mut values = case.extra_values.clone();
            values.resize(extras, String::new());

            if case.rows.is_empty() {
                let mut row = vec![case.name.clone(), String::new(), String::new()];
                row.extend(values);
                rows.push(row);
                continue;
            }

            for (i, step) in case.rows.iter().enumerate() {
                let mut row = Vec::with_capacity(header.len());
                if i == 0 {
                    row.push(case.name.clone());
                } else {
                    row.push(String::new());
                }
                row.push(step.step.clone());
                row.push(step.expected.clone());
                if i == 0 {
                    row.extend(values.iter().cloned());
                } else {
                    row.resize(header.len(), String::new());
                }
                rows.push(row);
            }
        }

        SuiteTable { header, rows }
    }
}

/// Output format of `stepsheet compile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field delimiter for the delimited formats.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{}' (expected csv, tsv or json)", other)),
        }
    }
}

/// Write `suite` as a delimited table, header first.
pub fn write_delimited<W: io::Write>(
    suite: &CompiledSuite,
    out: W,
    delimiter: u8,
) -> Result<(), ExportError> {
    let table = SuiteTable::from(suite);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `suite` as pretty-printed JSON.
pub fn write_json<W: io::Write>(suite: &CompiledSuite, out: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(out, suite)?;
    Ok(())
}

/// Write `suite` in `format`.
pub fn write_suite<W: io::Write>(
    suite: &CompiledSuite,
    out: W,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format.delimiter() {
        Some(delimiter) => write_delimited(suite, out, delimiter),
        None => write_json(suite, out),
    }
}

/// File name for an exported suite: the suite name with characters that are
/// unsafe in file names replaced by `_`.
pub fn export_file_name(suite_name: &str, format: ExportFormat) -> String {
    let mut stem: String = suite_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        stem = "suite".to_string();
    }
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiled::{CompiledRow, CompiledTestCase};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn suite() -> CompiledSuite {
        CompiledSuite {
            suite_name: "Login".into(),
            extra_columns: vec!["Priority".into(), "Owner".into()],
            test_cases: vec![
                CompiledTestCase {
                    name: "basic".into(),
                    extra_values: vec!["high".into()],
                    rows: vec![
                        CompiledRow::new("open page", "page shown"),
                        CompiledRow::new("login as alice", "dashboard shown"),
                    ],
                },
                CompiledTestCase {
                    name: "pending".into(),
                    extra_values: vec!["low".into(), "qa".into(), "overflow".into()],
                    rows: vec![],
                },
            ],
        }
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_table_layout() {
        let table = SuiteTable::from(&suite());
        assert_eq!(
            table.header,
            strings(&["Test Case", "Step", "Expected Result", "Priority", "Owner"])
        );
        assert_eq!(
            table.rows,
            vec![
                strings(&["basic", "open page", "page shown", "high", ""]),
                strings(&["", "login as alice", "dashboard shown", "", ""]),
                strings(&["pending", "", "", "low", "qa"]),
            ]
        );
        assert!(table.rows.iter().all(|row| row.len() == table.width()));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_surplus_extra_values_are_dropped_with_warning() {
        let suite = CompiledSuite {
            suite_name: "S".into(),
            extra_columns: vec!["Priority".into()],
            test_cases: vec![CompiledTestCase {
                name: "c".into(),
                extra_values: vec!["high".into(), "surplus".into()],
                rows: vec![CompiledRow::new("a", "b")],
            }],
        };

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let table = tracing::subscriber::with_default(subscriber, || SuiteTable::from(&suite));

        assert_eq!(table.rows, vec![strings(&["c", "a", "b", "high"])]);
        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("WARN"), "{}", log);
        assert!(log.contains("surplus"), "{}", log);
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_delimited(&suite(), &mut out, b',').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Test Case,Step,Expected Result,Priority,Owner\n\
             basic,open page,page shown,high,\n\
             ,login as alice,dashboard shown,,\n\
             pending,,,low,qa\n"
        );
    }

    #[test]
    fn test_write_tsv_quotes_only_when_needed() {
        let suite = CompiledSuite {
            suite_name: "S".into(),
            extra_columns: vec![],
            test_cases: vec![CompiledTestCase {
                name: "c".into(),
                extra_values: vec![],
                rows: vec![CompiledRow::new("type \"a, b\"", "ok")],
            }],
        };
        let mut out = Vec::new();
        write_suite(&suite, &mut out, ExportFormat::Tsv).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Test Case\tStep\tExpected Result\nc\t\"type \"\"a, b\"\"\"\tok\n"
        );
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_suite(&suite(), &mut out, ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["suite_name"], "Login");
        assert_eq!(value["test_cases"][0]["rows"][1]["step"], "login as alice");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Login", ExportFormat::Csv), "Login.csv");
        assert_eq!(export_file_name("a/b\\c", ExportFormat::Tsv), "a_b_c.tsv");
        assert_eq!(export_file_name("  ", ExportFormat::Json), "suite.json");
        assert_eq!(export_file_name("..", ExportFormat::Csv), "suite.csv");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TSV".parse::<ExportFormat>(), Ok(ExportFormat::Tsv));
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }
}
