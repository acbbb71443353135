//! `stepsheet`: compile, check and inspect stepsheets.
//!
//! ```bash
//! # Compile the last suite of a sheet into output/<suite>.csv
//! stepsheet compile tests.tsv -o output
//!
//! # Every suite, as JSON, failing on unresolved calls
//! stepsheet compile tests.tsv --all-suites --format json --strict
//!
//! # Lint a sheet
//! stepsheet check tests.tsv
//! ```
//!
//! Log output goes to stderr; set `STEPSHEET_LOG` (e.g. `debug`) or pass
//! `-v` to raise the level.

mod input;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use input::Sheet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stepsheet_compiler::{
    export_file_name, write_suite, BindingPolicy, CompileOptions, CompiledSuite, Compiler,
    ExportFormat,
};
use stepsheet_graph::CallGraph;
use stepsheet_parser::{serialize_tsv, validate_tree, ParseOptions, SemanticError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stepsheet")]
#[command(version)]
#[command(about = "Compile stepsheets of functions and test suites into flat test case tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Field delimiter of the input (default: ',' for .csv files, TAB otherwise)
    #[arg(long, short = 'd', global = true)]
    delimiter: Option<char>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile test suites into table files
    Compile {
        input: PathBuf,

        /// Output directory, created if missing
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Export every suite instead of only the last one
        #[arg(long)]
        all_suites: bool,

        /// Reject unresolved calls, ambiguous function names and repeated parameters
        #[arg(long)]
        strict: bool,

        /// Deepest allowed chain of nested calls
        #[arg(long, default_value_t = stepsheet_compiler::DEFAULT_MAX_CALL_DEPTH)]
        max_depth: usize,

        /// Fill parameters a call omits from the function's declared values
        #[arg(long)]
        with_defaults: bool,
    },

    /// Report syntax, semantic and call graph problems
    Check { input: PathBuf },

    /// Print the sheet in canonical TAB-separated form
    Fmt { input: PathBuf },

    /// Print the syntax tree as JSON
    Ast { input: PathBuf },

    /// Print the call graph and its findings as JSON
    Graph { input: PathBuf },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Tsv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
            Format::Json => ExportFormat::Json,
        }
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("STEPSHEET_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let delimiter = cli.delimiter;

    match cli.command {
        Commands::Compile {
            input,
            output,
            format,
            all_suites,
            strict,
            max_depth,
            with_defaults,
        } => {
            let (parse_options, mut options) = if strict {
                (ParseOptions::strict(), CompileOptions::strict())
            } else {
                (ParseOptions::default(), CompileOptions::default())
            };
            options = options.with_max_call_depth(max_depth);
            if with_defaults {
                options = options.with_bindings(BindingPolicy::WithDefaults);
            }

            let sheet = Sheet::load(&input, delimiter, &parse_options)?;
            cmd_compile(&sheet, &options, &output, format.into(), all_suites)
        }
        Commands::Check { input } => {
            let sheet = Sheet::load(&input, delimiter, &ParseOptions::default())?;
            cmd_check(&sheet)
        }
        Commands::Fmt { input } => {
            let sheet = Sheet::load(&input, delimiter, &ParseOptions::default())?;
            print!("{}", serialize_tsv(&sheet.tree)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Ast { input } => {
            let sheet = Sheet::load(&input, delimiter, &ParseOptions::default())?;
            println!("{}", serde_json::to_string_pretty(&sheet.tree)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Graph { input } => {
            let sheet = Sheet::load(&input, delimiter, &ParseOptions::default())?;
            let graph = CallGraph::from_tree(&sheet.tree);
            println!("{}", graph.to_json()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_compile(
    sheet: &Sheet,
    options: &CompileOptions,
    output: &Path,
    format: ExportFormat,
    all_suites: bool,
) -> Result<ExitCode> {
    let compilation = match Compiler::new(&sheet.tree, options.clone()).compile() {
        Ok(compilation) => compilation,
        Err(error) => {
            sheet.report_compile_error(&error)?;
            bail!("could not compile {}", sheet.path.display());
        }
    };

    let suites: Vec<&CompiledSuite> = if all_suites {
        compilation.suites.iter().collect()
    } else {
        compilation.current_suite().into_iter().collect()
    };
    if suites.is_empty() {
        bail!("{} declares no test suite", sheet.path.display());
    }

    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    for suite in suites {
        let path = output.join(export_file_name(&suite.suite_name, format));
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_suite(suite, &mut out, format)
            .with_context(|| format!("failed to write {}", path.display()))?;
        out.flush()?;

        tracing::info!(suite = %suite.suite_name, rows = suite.row_count(), "exported suite");
        println!("{}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_check(sheet: &Sheet) -> Result<ExitCode> {
    let mut findings = validate_tree(&sheet.tree);

    let graph = CallGraph::from_tree(&sheet.tree);
    findings.extend(graph.validate().all_issues().map(SemanticError::from));
    findings.sort_by_key(|finding| finding.line);

    let reporter = sheet.reporter();
    for finding in &findings {
        reporter.report_semantic_error(finding)?;
    }

    let errors = findings.iter().filter(|f| f.is_error()).count();
    let warnings = findings.len() - errors;
    eprintln!(
        "{}: {} error(s), {} warning(s)",
        sheet.path.display(),
        errors,
        warnings
    );

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
