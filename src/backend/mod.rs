//! tacfront Compiler Backend
//!
//! This module lowers the parsed AST to three-address code.
//!
//! The pipeline is:
//! 1. Parsed AST from the frontend → `TacGenerator` hoists top-level declarations
//! 2. A second walk emits TAC instructions and fills the symbol table
//! 3. The caller receives the listing, the final table and any redeclaration warnings
//!
//! ## Module Organization
//!
//! - `tac/` - TAC generation
//!   - `mod.rs` - Main `TacGenerator` struct and entry point
//!   - `config.rs` - Generator settings
//!   - `instr.rs` - Instruction type and listing
//!   - `errors.rs` - Generation errors
//!   - `decl.rs` - Hoisting and declaration lowering
//!   - `stmt.rs` - Statement lowering
//!   - `expr.rs` - Expression lowering

// Clippy: the backend must propagate errors, never panic on them.
#![deny(clippy::unwrap_used)]

pub mod tac;

pub use tac::{GenConfig, GenerationError, Instr, TacCode, TacGenerator, TacOutput};
