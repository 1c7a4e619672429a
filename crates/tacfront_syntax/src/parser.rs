//! Parser for the tacfront language
//!
//! Converts a token stream into an AST by recursive descent, with precedence climbing for binary
//! expressions. The parser performs no recovery: the first structural mismatch aborts the parse.
//!
//! ## Examples
//!
//! ```rust
//! use tacfront_syntax::{lexer, parser};
//!
//! let source = "function add(a, b) { return a + b; }";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert_eq!(ast.items.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::{Expected, ParseError};
use crate::lexer::{Token, TokenKind};
use tacfront_core::lang::keywords::KeywordId;
use tacfront_core::lang::operators;
use tacfront_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
