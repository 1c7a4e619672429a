//! Statement lowering.
//!
//! Control structures get two labels each from the run-wide counter: `else`/`end` for `if`,
//! `begin`/`end` for `while`. Every branch body is lowered in its own scope.

use super::TacGenerator;
use super::errors::GenerationError;
use super::instr::Instr;
use crate::frontend::ast::{AssignStmt, Expr, ExprStmt, IfStmt, Statement, WhileStmt};

impl TacGenerator {
    /// Lower a single statement.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if an assignment target is not a variable, array element or field.
    pub(super) fn lower_statement(&mut self, stmt: &Statement) -> Result<(), GenerationError> {
        match stmt {
            Statement::Assign(assign) => self.lower_assign(assign),
            Statement::If(if_stmt) => self.lower_if(if_stmt),
            Statement::While(while_stmt) => self.lower_while(while_stmt),
            Statement::Return(value) => {
                let value = value.as_ref().map(|v| self.lower_expr(v)).transpose()?;
                self.emit(Instr::Return(value));
                Ok(())
            }
            Statement::Expr(ExprStmt { block: Some(block), .. }) => self.lower_block(block),
            Statement::Expr(ExprStmt { expr, block: None }) => self.lower_expr(expr).map(drop),
        }
    }

    /// Right-hand side first, then commit to the target.
    fn lower_assign(&mut self, assign: &AssignStmt) -> Result<(), GenerationError> {
        let value = self.lower_expr(&assign.value)?;

        match &assign.target.node {
            Expr::Var(name) => {
                self.ensure_var(name)?;
                self.emit(Instr::Copy {
                    dst: name.clone(),
                    src: value,
                });
            }
            Expr::ArrayAccess(array, index) => {
                let index = self.lower_expr(index)?;
                self.ensure_array(array)?;
                self.emit(Instr::Store {
                    array: array.clone(),
                    index,
                    value,
                });
            }
            Expr::FieldAccess(base, field) => {
                let base = self.lower_expr(base)?;
                self.emit(Instr::FieldStore {
                    base,
                    field: field.clone(),
                    value,
                });
            }
            other => {
                return Err(GenerationError::UnsupportedAssignTarget {
                    kind: other.kind_name(),
                    span: assign.target.span.into(),
                });
            }
        }
        Ok(())
    }

    fn lower_if(&mut self, stmt: &IfStmt) -> Result<(), GenerationError> {
        let cond = self.lower_expr(&stmt.condition)?;
        let else_label = self.new_label()?;
        let end_label = self.new_label()?;

        self.emit(Instr::IfFalse {
            cond,
            target: else_label.clone(),
        });
        self.lower_block(&stmt.then_body)?;
        self.emit(Instr::Goto(end_label.clone()));
        self.emit(Instr::Label(else_label));
        if let Some(else_body) = stmt.else_body.as_deref().filter(|b| !b.is_empty()) {
            self.lower_block(else_body)?;
        }
        self.emit(Instr::Label(end_label));
        Ok(())
    }

    fn lower_while(&mut self, stmt: &WhileStmt) -> Result<(), GenerationError> {
        let begin_label = self.new_label()?;
        let end_label = self.new_label()?;

        self.emit(Instr::Label(begin_label.clone()));
        let cond = self.lower_expr(&stmt.condition)?;
        self.emit(Instr::IfFalse {
            cond,
            target: end_label.clone(),
        });
        self.lower_block(&stmt.body)?;
        self.emit(Instr::Goto(begin_label));
        self.emit(Instr::Label(end_label));
        Ok(())
    }
}
