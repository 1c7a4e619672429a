//! Syntax frontend for the tacfront language: lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the code generator, the graph serializer,
//! and any external tooling that only needs a parsed tree.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not build symbol tables or emit code.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `tacfront_core::lang` registries.
//! - Every AST node carries a [`ast::NodeId`] handed out by the parser of one compilation run.
//!
//! ## Examples
//! ```rust
//! use tacfront_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("const PI = 3;").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.items.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
