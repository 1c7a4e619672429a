//! Canonical language vocabulary for the tacfront compiler front-end.
//!
//! This crate is intentionally small and dependency-free. It owns the reserved words, operators and
//! punctuation of the source language as registry tables with stable ids, so the lexer, parser,
//! generator and diagnostics agree on spellings without scattering string literals around.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, and no AST or token types.
//! - The lexer/parser enforce syntax; the registries only provide spellings and metadata.

pub mod lang;
