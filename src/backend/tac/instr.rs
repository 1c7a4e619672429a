//! Three-address instructions and the instruction listing.
//!
//! Every instruction has at most one operator, two operands and one destination. Operands are
//! names: either a source-level identifier or a generated temporary.

use std::fmt;

use crate::frontend::ast::format_number;
use tacfront_core::lang::operators::{self, OperatorId};

/// One TAC instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// `dst = value` for a numeric literal
    Const { dst: String, value: f64 },
    /// `dst = src`
    Copy { dst: String, src: String },
    /// `dst = lhs OP rhs`
    Binary {
        dst: String,
        lhs: String,
        op: OperatorId,
        rhs: String,
    },
    /// `store arr, idx, value`
    Store { array: String, index: String, value: String },
    /// `dst = load arr, idx`
    Load { dst: String, array: String, index: String },
    /// `field_store base, field, value`
    FieldStore { base: String, field: String, value: String },
    /// `dst = field_load base, field`
    FieldLoad { dst: String, base: String, field: String },
    /// `param v`
    Param(String),
    /// `dst = call name, argc`
    Call { dst: String, callee: String, argc: usize },
    /// `label L`
    Label(String),
    /// `goto L`
    Goto(String),
    /// `if_false cond goto L`
    IfFalse { cond: String, target: String },
    /// `return [v]`
    Return(Option<String>),
}

impl Instr {
    /// Return `true` for instructions that transfer or mark control flow.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Instr::Label(_) | Instr::Goto(_) | Instr::IfFalse { .. } | Instr::Return(_)
        )
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Const { dst, value } => write!(f, "{dst} = {}", format_number(*value)),
            Instr::Copy { dst, src } => write!(f, "{dst} = {src}"),
            Instr::Binary { dst, lhs, op, rhs } => write!(f, "{dst} = {lhs} {} {rhs}", operators::as_str(*op)),
            Instr::Store { array, index, value } => write!(f, "store {array}, {index}, {value}"),
            Instr::Load { dst, array, index } => write!(f, "{dst} = load {array}, {index}"),
            Instr::FieldStore { base, field, value } => write!(f, "field_store {base}, {field}, {value}"),
            Instr::FieldLoad { dst, base, field } => write!(f, "{dst} = field_load {base}, {field}"),
            Instr::Param(v) => write!(f, "param {v}"),
            Instr::Call { dst, callee, argc } => write!(f, "{dst} = call {callee}, {argc}"),
            Instr::Label(l) => write!(f, "label {l}"),
            Instr::Goto(l) => write!(f, "goto {l}"),
            Instr::IfFalse { cond, target } => write!(f, "if_false {cond} goto {target}"),
            Instr::Return(Some(v)) => write!(f, "return {v}"),
            Instr::Return(None) => f.write_str("return"),
        }
    }
}

/// Append-only instruction sequence in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TacCode {
    instrs: Vec<Instr>,
}

impl TacCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instr> {
        self.instrs.iter()
    }

    /// One rendered line per instruction.
    pub fn lines(&self) -> Vec<String> {
        self.instrs.iter().map(ToString::to_string).collect()
    }

    /// Rendered instructions with right-aligned 1-based line numbers (`  1: t0 = 3.0`).
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (i, instr) in self.instrs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{:>3}: {instr}", i + 1));
        }
        out
    }
}

impl fmt::Display for TacCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

impl<'a> IntoIterator for &'a TacCode {
    type Item = &'a Instr;
    type IntoIter = std::slice::Iter<'a, Instr>;

    fn into_iter(self) -> Self::IntoIter {
        self.instrs.iter()
    }
}
