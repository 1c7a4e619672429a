//! CLI module for the tacfront compiler
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `<file>` - Full report: TAC listing and symbol table (`--tokens`, `--dot <path>` add more)
//! - `lex <file>` - Print the token list
//! - `parse <file>` - Print the AST (`--dot` prints graph text instead)
//! - `tac <file>` - Print the TAC listing
//! - `symbols <file>` - Print the final symbol table
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Usage error (no file and no subcommand).
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Lower a small imperative language to three-address code
#[derive(Parser, Debug)]
#[command(name = "tacfront")]
#[command(version = VERSION)]
#[command(about = "Lower a small imperative language to three-address code", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Source file to compile (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Also print the token list
    #[arg(long)]
    pub tokens: bool,

    /// Write the AST graph text to PATH (`-` for stdout)
    #[arg(long = "dot", value_name = "PATH")]
    pub dot: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tokenize and print one token per line
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse and print the AST
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print graph text instead of the tree dump
        #[arg(long)]
        dot: bool,
    },

    /// Generate and print three-address code
    Tac {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Prefix each instruction with its 1-based line number
        #[arg(short, long)]
        numbered: bool,
    },

    /// Generate and print the final symbol table
    Symbols {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(Command::Lex { file }) => commands::lex_file(&file),
        Some(Command::Parse { file, dot }) => commands::parse_file(&file, dot),
        Some(Command::Tac { file, numbered }) => commands::tac_file(&file, numbered),
        Some(Command::Symbols { file }) => commands::symbols_file(&file),
        None => {
            let Some(file) = cli.file else {
                return Err(CliError::new(
                    "Error: expected a source file or a subcommand (see --help)",
                    ExitCode::USAGE,
                ));
            };
            let options = commands::ReportOptions {
                show_tokens: cli.tokens,
                dot_path: cli.dot.as_deref(),
            };
            commands::report_file(&file, &options)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default_file() {
        let cli = Cli::try_parse_from(["tacfront", "prog.txt"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("prog.txt")));
        assert!(!cli.tokens);
        assert!(cli.dot.is_none());
    }

    #[test]
    fn test_cli_parse_report_flags() {
        let cli = Cli::try_parse_from(["tacfront", "prog.txt", "--tokens", "--dot", "ast.dot"]).unwrap();
        assert!(cli.tokens);
        assert_eq!(cli.dot, Some(PathBuf::from("ast.dot")));
    }

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::try_parse_from(["tacfront", "lex", "prog.txt"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Lex { .. })));
    }

    #[test]
    fn test_cli_parse_parse_dot() {
        let cli = Cli::try_parse_from(["tacfront", "parse", "prog.txt", "--dot"]).unwrap();
        if let Some(Command::Parse { dot, .. }) = cli.command {
            assert!(dot);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_parse_tac_numbered() {
        let cli = Cli::try_parse_from(["tacfront", "tac", "-n", "prog.txt"]).unwrap();
        if let Some(Command::Tac { numbered, file }) = cli.command {
            assert!(numbered);
            assert_eq!(file, PathBuf::from("prog.txt"));
        } else {
            panic!("Expected Tac command");
        }
    }

    #[test]
    fn test_cli_parse_symbols() {
        let cli = Cli::try_parse_from(["tacfront", "symbols", "prog.txt"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Symbols { .. })));
    }

    #[test]
    fn test_execute_without_file_is_usage_error() {
        let cli = Cli::try_parse_from(["tacfront"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::USAGE);
    }
}
