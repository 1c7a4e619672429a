//! Declaration hoisting and lowering.
//!
//! Hoisting registers every top-level declaration before any code is emitted. Lowering then emits
//! code for the declarations that have any: constants and routines.

use super::{Instr, TacGenerator};
use super::errors::GenerationError;
use crate::frontend::ast::{self, Declaration, Item, Program, Spanned};
use crate::frontend::symbols::{SymbolEntry, SymbolKind};

/// Declared type of every numeric storage entry.
pub(super) const FLOAT_TYPE: &str = "float";

/// Routine flavours share their lowering; only the symbol kind and label prefix differ.
#[derive(Clone, Copy)]
enum RoutineKind {
    Function,
    Procedure,
}

impl RoutineKind {
    fn label_for(self, name: &str) -> String {
        match self {
            RoutineKind::Function => format!("func_{name}"),
            RoutineKind::Procedure => format!("proc_{name}"),
        }
    }
}

/// Label a call site links against when the callee was never declared.
pub(super) fn inferred_function_label(name: &str) -> String {
    RoutineKind::Function.label_for(name)
}

impl TacGenerator {
    /// Pass 1: register every top-level declaration in the global scope.
    pub(super) fn hoist(&mut self, program: &Program) -> Result<(), GenerationError> {
        for item in &program.items {
            if let Item::Decl(decl) = &item.node {
                tracing::trace!(name = decl.name(), "hoisting declaration");
                let entry = self.hoisted_entry(decl)?;
                self.declare(entry)?;
            }
        }
        Ok(())
    }

    fn hoisted_entry(&self, decl: &Declaration) -> Result<SymbolEntry, GenerationError> {
        let word = self.config.word_size;
        let entry = match decl {
            Declaration::Const(c) => SymbolEntry::new(&c.name, SymbolKind::Const)
                .with_type(FLOAT_TYPE)
                .with_size(word),
            Declaration::Var(v) => SymbolEntry::new(&v.name, SymbolKind::Var)
                .with_type(v.ty.as_deref().unwrap_or(FLOAT_TYPE))
                .with_size(word),
            Declaration::Array(a) => {
                let bytes = a.size.checked_mul(word).ok_or_else(|| GenerationError::ArrayTooLarge {
                    name: a.name.clone(),
                    length: a.size,
                })?;
                SymbolEntry::new(&a.name, SymbolKind::Array)
                    .with_type(FLOAT_TYPE)
                    .with_size(bytes)
            }
            Declaration::Type(t) => SymbolEntry::new(&t.name, SymbolKind::Type)
                .with_type(&t.name)
                .with_extra("fields", t.fields.join(", ")),
            Declaration::Function(f) => SymbolEntry::new(&f.name, SymbolKind::Func)
                .with_params(f.params.clone())
                .with_return_type(f.return_type.clone())
                .with_label(RoutineKind::Function.label_for(&f.name)),
            Declaration::Procedure(p) => SymbolEntry::new(&p.name, SymbolKind::Proc)
                .with_params(p.params.clone())
                .with_label(RoutineKind::Procedure.label_for(&p.name)),
        };
        Ok(entry)
    }

    /// Pass 2: emit code for one top-level declaration.
    pub(super) fn lower_declaration(&mut self, decl: &Declaration) -> Result<(), GenerationError> {
        match decl {
            Declaration::Const(c) => {
                let value = self.lower_expr(&c.value)?;
                self.emit(Instr::Copy {
                    dst: c.name.clone(),
                    src: value,
                });
                Ok(())
            }
            // Storage and layout only; nothing to execute.
            Declaration::Var(_) | Declaration::Array(_) | Declaration::Type(_) => Ok(()),
            Declaration::Function(f) => self.lower_routine(RoutineKind::Function, &f.name, &f.params, &f.body),
            Declaration::Procedure(p) => self.lower_routine(RoutineKind::Procedure, &p.name, &p.params, &p.body),
        }
    }

    fn lower_routine(
        &mut self,
        kind: RoutineKind,
        name: &str,
        params: &[ast::Ident],
        body: &[Spanned<ast::Statement>],
    ) -> Result<(), GenerationError> {
        let label = kind.label_for(name);
        tracing::debug!(routine = name, label = %label, "lowering routine");
        self.emit(Instr::Label(label.clone()));
        if let Some(entry) = self.symbols.lookup_mut(name) {
            entry.label = Some(label);
        }

        self.symbols.enter_scope();
        for param in params {
            let entry = SymbolEntry::new(param, SymbolKind::Param).with_size(self.config.word_size);
            if let Err(err) = self.declare(entry) {
                self.symbols.exit_scope();
                return Err(err);
            }
        }
        let result = body.iter().try_for_each(|s| self.lower_statement(&s.node));
        self.symbols.exit_scope();
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{GenerationError, TacGenerator, TacOutput};
    use crate::frontend::symbols::SymbolKind;
    use crate::frontend::{lexer, parser};

    fn generate(source: &str) -> TacOutput {
        let tokens = lexer::lex(source).unwrap();
        let program = parser::parse(&tokens).unwrap();
        TacGenerator::new().generate(&program).unwrap()
    }

    #[test]
    fn test_hoisting_enables_forward_calls() {
        let out = generate("function main() { x = helper(1); } function helper(n) { return n; }");
        let helper = out.symbols.lookup("helper").unwrap();
        assert_eq!(helper.kind, SymbolKind::Func);
        assert_eq!(helper.params.as_deref(), Some(&["n".to_string()][..]));
        // Not an inferred entry: the declaration was hoisted before `main` was lowered.
        assert!(!helper.extra.contains_key("inferred"));
    }

    #[test]
    fn test_hoisted_entry_shapes() {
        let out = generate("const C = 1; array A[5]; type Point { x; y; } procedure p(a, b) { }");

        let c = out.symbols.lookup("C").unwrap();
        assert_eq!((c.declared_type.as_deref(), c.address, c.size), (Some("float"), Some(0), Some(8)));

        let a = out.symbols.lookup("A").unwrap();
        assert_eq!((a.address, a.size), (Some(8), Some(40)));

        let point = out.symbols.lookup("Point").unwrap();
        assert_eq!(point.declared_type.as_deref(), Some("Point"));
        assert_eq!(point.extra.get("fields").map(String::as_str), Some("x, y"));
        assert_eq!(point.address, None);

        let p = out.symbols.lookup("p").unwrap();
        assert_eq!(p.kind, SymbolKind::Proc);
        assert_eq!(p.label.as_deref(), Some("proc_p"));
    }

    #[test]
    fn test_routine_body_and_params() {
        let out = generate("function add(a, b) { return a + b; }");
        insta::assert_snapshot!(out.code.to_string(), @r"
        label func_add
        t0 = a + b
        return t0
        ");
        // Parameters live in the routine scope only.
        assert!(out.symbols.lookup("a").is_none());
        assert!(out.symbols.lookup("t0").is_none());
    }

    #[test]
    fn test_parameters_take_addresses() {
        let tokens = lexer::lex("const K = 1; function f(a, b) { r = a; } z = 2;").unwrap();
        let program = parser::parse(&tokens).unwrap();
        let out = TacGenerator::new().generate(&program).unwrap();
        // K:0, a:8, b:16, r:24 (scope discarded), z:32
        assert_eq!(out.symbols.lookup("z").and_then(|e| e.address), Some(32));
    }

    fn generate_err(source: &str) -> GenerationError {
        let tokens = lexer::lex(source).unwrap();
        let program = parser::parse(&tokens).unwrap();
        TacGenerator::new().generate(&program).unwrap_err()
    }

    #[test]
    fn test_array_byte_size_overflow_is_an_error() {
        let err = generate_err("array a[3000000000000000000];");
        assert_eq!(
            err,
            GenerationError::ArrayTooLarge {
                name: "a".to_string(),
                length: 3_000_000_000_000_000_000,
            }
        );
    }

    #[test]
    fn test_address_space_exhaustion_is_an_error() {
        let err = generate_err("array a[2000000000000000000]; array b[2000000000000000000];");
        let GenerationError::AddressSpaceExhausted(exhausted) = err else {
            panic!("expected address space exhaustion, got {err:?}");
        };
        assert_eq!(exhausted.name, "b");
        assert_eq!(exhausted.offset, 16_000_000_000_000_000_000);
    }
}
