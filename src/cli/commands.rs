//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use miette::{NamedSource, Report};

use crate::backend::TacGenerator;
use crate::frontend::ast::Program;
use crate::frontend::lexer::{self, Token};
use crate::frontend::parser;
use crate::graph;
use crate::{CompileError, Compilation};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (10 MB)
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// What the default command prints besides the TAC listing and symbol dump.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions<'a> {
    pub show_tokens: bool,
    /// Where to write the graph text; `-` means stdout.
    pub dot_path: Option<&'a Path>,
}

/// Read a source file with size validation.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Render a pipeline error against its source, with the offending span highlighted.
pub fn render_error(file_path: &Path, source: &str, err: impl Into<CompileError>) -> CliError {
    let report = Report::new(err.into())
        .with_source_code(NamedSource::new(file_path.display().to_string(), source.to_string()));
    CliError::failure(format!("{report:?}").trim_end())
}

fn tokens_of(file_path: &Path, source: &str) -> CliResult<Vec<Token>> {
    lexer::lex(source).map_err(|e| render_error(file_path, source, e))
}

fn program_of(file_path: &Path, source: &str) -> CliResult<Program> {
    let tokens = tokens_of(file_path, source)?;
    parser::parse(&tokens).map_err(|e| render_error(file_path, source, e))
}

/// Lex and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    for tok in tokens_of(file_path, &source)? {
        println!("{tok}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the AST, or its graph text with `as_dot`.
pub fn parse_file(file_path: &Path, as_dot: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = program_of(file_path, &source)?;
    if as_dot {
        println!("{}", graph::to_dot(&program));
    } else {
        println!("{program:#?}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Generate and display the TAC listing.
pub fn tac_file(file_path: &Path, numbered: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = program_of(file_path, &source)?;
    let output = TacGenerator::new()
        .generate(&program)
        .map_err(|e| render_error(file_path, &source, e))?;

    if numbered {
        println!("{}", output.code.listing());
    } else {
        println!("{}", output.code);
    }
    Ok(ExitCode::SUCCESS)
}

/// Generate and display the final symbol table.
pub fn symbols_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = program_of(file_path, &source)?;
    let output = TacGenerator::new()
        .generate(&program)
        .map_err(|e| render_error(file_path, &source, e))?;
    println!("{}", output.symbols.dump());
    Ok(ExitCode::SUCCESS)
}

/// Run the whole pipeline and print the full report.
pub fn report_file(file_path: &Path, options: &ReportOptions<'_>) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let compilation = crate::compile(&source).map_err(|e| render_error(file_path, &source, e))?;

    print!("{}", render_report(&compilation, options.show_tokens));

    if let Some(path) = options.dot_path {
        write_dot(&compilation, path)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Text of the full report: optional token list, numbered TAC listing and symbol dump.
pub fn render_report(compilation: &Compilation, show_tokens: bool) -> String {
    let mut out = String::new();
    if show_tokens {
        out.push_str(&format!("--- TOKENS ({}) ---\n", compilation.tokens.len()));
        for tok in &compilation.tokens {
            out.push_str(&format!("{tok}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("--- TAC ({} instructions) ---\n", compilation.tac.len()));
    if !compilation.tac.is_empty() {
        out.push_str(&compilation.tac.listing());
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&compilation.symbols.dump());
    out.push('\n');

    if !compilation.warnings.is_empty() {
        out.push_str(&format!("\n{} warning(s)\n", compilation.warnings.len()));
        for warning in &compilation.warnings {
            out.push_str(&format!("  {warning}\n"));
        }
    }
    out
}

fn write_dot(compilation: &Compilation, path: &Path) -> CliResult<()> {
    let dot = compilation.dot();
    if path == Path::new("-") {
        println!("{dot}");
        return Ok(());
    }
    fs::write(path, format!("{dot}\n"))
        .map_err(|e| CliError::failure(format!("Error writing graph to '{}': {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), "wrote AST graph");
    Ok(())
}
