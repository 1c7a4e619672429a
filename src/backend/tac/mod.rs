//! AST to three-address-code generation.
//!
//! This module walks a parsed [`Program`] and produces a linear list of TAC instructions while
//! populating a [`SymbolTable`] as a side effect. Generation runs in two passes:
//!
//! 1. Hoisting: every top-level declaration is registered in the global scope, so routines may refer
//!    to each other before their definition.
//! 2. Emission: items are walked in source order and instructions are appended in the order
//!    execution would reach them.
//!
//! # Architecture
//!
//! - `config` - Generator settings (`GenConfig`)
//! - `instr` - Instruction type and listing (`Instr`, `TacCode`)
//! - `errors` - Error types (`GenerationError`)
//! - `decl` - Hoisting and declaration lowering
//! - `stmt` - Statement lowering
//! - `expr` - Expression lowering
//!
//! # Implicit declarations
//!
//! The language has no variable declarations in its surface syntax. Any identifier the table does
//! not know yet is registered the first time it is seen: plain names as `var`, indexed names as
//! `array`, called names as an inferred `func`. This is the generator's symbol-resolution fallback,
//! not an error path.
//!
//! # Usage
//!
//! ```rust
//! use tacfront::backend::TacGenerator;
//! use tacfront::frontend::{lexer, parser};
//!
//! let tokens = lexer::lex("const PI = 3;").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! let output = TacGenerator::new().generate(&program).unwrap();
//! assert_eq!(output.code.lines(), vec!["t0 = 3.0", "PI = t0"]);
//! ```

mod config;
mod decl;
mod errors;
mod expr;
mod instr;
mod stmt;

use crate::frontend::ast::{Item, Program, Spanned, Statement};
use crate::frontend::symbols::{DuplicateDeclaration, SymbolEntry, SymbolKind, SymbolTable};

pub use config::GenConfig;
pub use errors::GenerationError;
pub use instr::{Instr, TacCode};

/// Everything one generation run produces.
#[derive(Debug)]
pub struct TacOutput {
    pub code: TacCode,
    /// Table state at the end of the run (only the global scope is still open).
    pub symbols: SymbolTable,
    /// Redeclarations seen along the way, in the order they happened.
    pub warnings: Vec<DuplicateDeclaration>,
}

/// TAC generation context.
///
/// Owns all per-run state: the symbol table, the instruction buffer and the temp/label counters.
/// A generator is consumed by [`TacGenerator::generate`], so counters never leak between runs.
pub struct TacGenerator {
    pub(super) config: GenConfig,
    pub(super) symbols: SymbolTable,
    pub(super) code: TacCode,
    pub(super) temp_count: usize,
    pub(super) label_count: usize,
    pub(super) warnings: Vec<DuplicateDeclaration>,
}

impl Default for TacGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TacGenerator {
    /// Create a generator with default settings.
    pub fn new() -> Self {
        Self::with_config(GenConfig::default())
    }

    /// Create a generator with custom settings.
    pub fn with_config(config: GenConfig) -> Self {
        Self {
            symbols: SymbolTable::with_word_size(config.word_size),
            config,
            code: TacCode::new(),
            temp_count: 0,
            label_count: 0,
            warnings: Vec::new(),
        }
    }

    /// Generate TAC for a complete program.
    ///
    /// # Parameters
    ///
    /// * `program` - The parsed program
    ///
    /// # Returns
    ///
    /// The instruction listing, the final symbol table and any redeclaration warnings.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the tree contains a shape the generator cannot lower or the
    /// declared storage does not fit in the address space. Generation stops at the first such error.
    #[tracing::instrument(skip_all, fields(item_count = program.items.len()))]
    pub fn generate(mut self, program: &Program) -> Result<TacOutput, GenerationError> {
        self.hoist(program)?;

        for item in &program.items {
            match &item.node {
                Item::Decl(decl) => self.lower_declaration(decl)?,
                Item::Stmt(stmt) => self.lower_statement(stmt)?,
            }
        }

        tracing::debug!(
            instructions = self.code.len(),
            temps = self.temp_count,
            labels = self.label_count,
            "generation finished"
        );

        Ok(TacOutput {
            code: self.code,
            symbols: self.symbols,
            warnings: self.warnings,
        })
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    pub(super) fn emit(&mut self, instr: Instr) {
        self.code.push(instr);
    }

    /// Add an entry to the innermost scope, logging and recording redeclarations.
    pub(super) fn declare(&mut self, entry: SymbolEntry) -> Result<(), GenerationError> {
        if let Some(warning) = self.symbols.add(entry)? {
            tracing::warn!(name = %warning.name, scope = warning.scope_level, "{warning}");
            self.warnings.push(warning);
        }
        Ok(())
    }

    /// Allocate a fresh temporary and register it in the current scope.
    pub(super) fn new_temp(&mut self) -> Result<String, GenerationError> {
        let name = format!("{}{}", self.config.temp_prefix, self.temp_count);
        self.temp_count += 1;
        let entry = SymbolEntry::new(name.clone(), SymbolKind::Temp).with_size(self.config.word_size);
        self.declare(entry)?;
        Ok(name)
    }

    /// Allocate a fresh label and register it in the current scope.
    pub(super) fn new_label(&mut self) -> Result<String, GenerationError> {
        let name = format!("{}{}", self.config.label_prefix, self.label_count);
        self.label_count += 1;
        let entry = SymbolEntry::new(name.clone(), SymbolKind::Label).with_label(name.clone());
        self.declare(entry)?;
        Ok(name)
    }

    /// Lower `stmts` inside a fresh scope that is discarded afterwards.
    pub(super) fn lower_block(&mut self, stmts: &[Spanned<Statement>]) -> Result<(), GenerationError> {
        self.symbols.enter_scope();
        let result = stmts.iter().try_for_each(|s| self.lower_statement(&s.node));
        self.symbols.exit_scope();
        result
    }

    /// Register `name` as a plain variable if nothing by that name is visible.
    pub(super) fn ensure_var(&mut self, name: &str) -> Result<(), GenerationError> {
        if self.symbols.lookup(name).is_none() {
            tracing::debug!(name, "implicitly declaring variable");
            let entry = SymbolEntry::new(name, SymbolKind::Var)
                .with_type(decl::FLOAT_TYPE)
                .with_size(self.config.word_size);
            self.declare(entry)?;
        }
        Ok(())
    }

    /// Register `name` as an array of unknown length if nothing by that name is visible.
    pub(super) fn ensure_array(&mut self, name: &str) -> Result<(), GenerationError> {
        if self.symbols.lookup(name).is_none() {
            tracing::debug!(name, "implicitly declaring array");
            self.declare(SymbolEntry::new(name, SymbolKind::Array).with_type(decl::FLOAT_TYPE))?;
        }
        Ok(())
    }
}
