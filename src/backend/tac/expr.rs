//! Expression lowering.
//!
//! Operands are evaluated strictly left to right. Every value lands in a fresh temporary, except a
//! bare variable reference, which evaluates to the variable's own name.

use super::TacGenerator;
use super::decl::inferred_function_label;
use super::errors::GenerationError;
use super::instr::Instr;
use crate::frontend::ast::{Expr, Spanned};
use crate::frontend::symbols::{SymbolEntry, SymbolKind};

impl TacGenerator {
    /// Lower an expression and return the name holding its value.
    pub(super) fn lower_expr(&mut self, expr: &Spanned<Expr>) -> Result<String, GenerationError> {
        match &expr.node {
            Expr::Number(value) => {
                let dst = self.new_temp()?;
                self.emit(Instr::Const {
                    dst: dst.clone(),
                    value: *value,
                });
                Ok(dst)
            }
            Expr::Var(name) => {
                self.ensure_var(name)?;
                Ok(name.clone())
            }
            Expr::Binary(lhs, op, rhs) => {
                let lhs = self.lower_expr(lhs)?;
                let rhs = self.lower_expr(rhs)?;
                let dst = self.new_temp()?;
                self.emit(Instr::Binary {
                    dst: dst.clone(),
                    lhs,
                    op: *op,
                    rhs,
                });
                Ok(dst)
            }
            Expr::Call(callee, args) => self.lower_call(callee, args),
            Expr::ArrayAccess(array, index) => {
                let index = self.lower_expr(index)?;
                let dst = self.new_temp()?;
                self.emit(Instr::Load {
                    dst: dst.clone(),
                    array: array.clone(),
                    index,
                });
                self.ensure_array(array)?;
                Ok(dst)
            }
            Expr::FieldAccess(base, field) => {
                let base = self.lower_expr(base)?;
                let dst = self.new_temp()?;
                self.emit(Instr::FieldLoad {
                    dst: dst.clone(),
                    base,
                    field: field.clone(),
                });
                Ok(dst)
            }
        }
    }

    /// Arguments, then one `param` per argument, then the call itself.
    fn lower_call(&mut self, callee: &str, args: &[Spanned<Expr>]) -> Result<String, GenerationError> {
        let values = args
            .iter()
            .map(|arg| self.lower_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let argc = values.len();
        for value in values {
            self.emit(Instr::Param(value));
        }

        let dst = self.new_temp()?;
        self.emit(Instr::Call {
            dst: dst.clone(),
            callee: callee.to_string(),
            argc,
        });

        if self.symbols.lookup(callee).is_none() {
            tracing::debug!(callee, argc, "implicitly declaring function");
            let entry = SymbolEntry::new(callee, SymbolKind::Func)
                .with_label(inferred_function_label(callee))
                .with_extra("arity", argc.to_string())
                .with_extra("inferred", "true");
            self.declare(entry)?;
        }
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{TacGenerator, TacOutput};
    use crate::frontend::symbols::SymbolKind;
    use crate::frontend::{lexer, parser};

    fn generate(source: &str) -> TacOutput {
        let tokens = lexer::lex(source).unwrap();
        let program = parser::parse(&tokens).unwrap();
        TacGenerator::new().generate(&program).unwrap()
    }

    #[test]
    fn test_binary_evaluates_left_to_right() {
        let out = generate("r = (a + 2) * -b;");
        insta::assert_snapshot!(out.code.to_string(), @r"
        t0 = 2.0
        t1 = a + t0
        t2 = 0.0
        t3 = t2 - b
        t4 = t1 * t3
        r = t4
        ");
    }

    #[test]
    fn test_call_arguments_then_params() {
        let out = generate("r = f(g(1), x + 1);");
        insta::assert_snapshot!(out.code.to_string(), @r"
        t0 = 1.0
        param t0
        t1 = call g, 1
        t2 = 1.0
        t3 = x + t2
        param t1
        param t3
        t4 = call f, 2
        r = t4
        ");
    }

    #[test]
    fn test_unknown_callee_is_inferred() {
        let out = generate("r = f(1, 2);");
        let f = out.symbols.lookup("f").unwrap();
        assert_eq!(f.kind, SymbolKind::Func);
        assert_eq!(f.label.as_deref(), Some("func_f"));
        assert_eq!(f.params, None);
        assert_eq!(f.extra.get("arity").map(String::as_str), Some("2"));
        assert_eq!(f.extra.get("inferred").map(String::as_str), Some("true"));
        assert_eq!(f.address, None);
    }

    #[test]
    fn test_field_load_reads_through_base_variable() {
        let out = generate("v = p.y;");
        assert_eq!(out.code.lines(), vec!["t0 = field_load p, y", "v = t0"]);
    }

    #[test]
    fn test_fractional_literals_keep_their_digits() {
        let out = generate("v = 2.5;");
        assert_eq!(out.code.lines(), vec!["t0 = 2.5", "v = t0"]);
    }
}
