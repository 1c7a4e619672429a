//! tacfront Compiler Frontend
//!
//! This module contains all frontend components:
//! - `lexer`: tokenization of source code
//! - `parser`: parsing tokens into AST
//! - `ast`: abstract syntax tree definitions
//! - `diagnostics`: lexing and parsing errors
//! - `symbols`: symbol table, scopes and storage allocation

// Syntax components are provided by the shared tacfront_syntax crate.
pub use tacfront_syntax::{ast, diagnostics, lexer, parser};

// Compiler-specific pieces remain local.
pub mod symbols;
