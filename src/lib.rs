#![forbid(unsafe_code)]
//! tacfront: a front-end compiler for a small imperative language
//!
//! Source text is lexed, parsed into an AST and lowered to three-address code (TAC) while a scoped
//! symbol table records every declared or implicitly introduced name. The parsed tree can also be
//! serialized as directed-graph text for an external viewer.
//!
//! - `frontend`: lexer, parser and AST (from `tacfront_syntax`), plus the symbol table
//! - `backend`: TAC generation
//! - `graph`: AST graph serializer
//! - `cli`: the `tacfront` command-line driver
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//!
//! ```rust
//! let compilation = tacfront::compile("x = 1; while (x < 3) { x = x + 1; }").unwrap();
//! assert_eq!(compilation.tac.lines()[0], "t0 = 1.0");
//! assert!(compilation.symbols.lookup("x").is_some());
//! ```

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod graph;

use miette::Diagnostic;
use thiserror::Error;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::symbols;

pub use backend::{GenConfig, GenerationError, TacCode, TacGenerator};
pub use graph::{GraphConfig, to_dot, to_dot_with_config};

use diagnostics::{LexError, ParseError};
use lexer::Token;
use symbols::{DuplicateDeclaration, SymbolTable};

/// Any fatal error from one pipeline run. The stage that failed is the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenerationError),
}

impl CompileError {
    /// Short stage name for messages (`lex`, `parse`, `generate`).
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Lex(_) => "lex",
            CompileError::Parse(_) => "parse",
            CompileError::Generate(_) => "generate",
        }
    }
}

/// All artifacts of a successful run.
#[derive(Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: ast::Program,
    pub tac: TacCode,
    pub symbols: SymbolTable,
    pub warnings: Vec<DuplicateDeclaration>,
}

impl Compilation {
    /// Graph text for the parsed tree, default settings.
    pub fn dot(&self) -> String {
        graph::to_dot(&self.program)
    }
}

/// Run lex, parse and generate over `source` with default settings.
pub fn compile(source: &str) -> Result<Compilation, CompileError> {
    compile_with_config(source, GenConfig::default())
}

/// Run lex, parse and generate over `source`.
///
/// # Errors
///
/// Returns the first `LexError`, `ParseError` or `GenerationError`; later stages do not run.
pub fn compile_with_config(source: &str, config: GenConfig) -> Result<Compilation, CompileError> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse(&tokens)?;
    let output = TacGenerator::with_config(config).generate(&program)?;
    Ok(Compilation {
        tokens,
        program,
        tac: output.code,
        symbols: output.symbols,
        warnings: output.warnings,
    })
}
