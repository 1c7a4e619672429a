//! AST walk that emits graph statements
//!
//! Each node's label line is written before its children are visited; the edge to a child is written
//! right after that child's subtree. `If`, `While` and record types get synthetic grouping nodes
//! (`Then`, `Else`, `Body`, one per field) whose ids continue after the parsed nodes.

use tacfront_core::lang::operators;

use super::config::GraphConfig;
use super::writer::GraphWriter;
use crate::frontend::ast::*;

/// Rendered graph text plus the counts of what it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstGraph {
    pub text: String,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Walks a [`Program`] and writes one node statement per tree node and one edge per parent/child link
pub struct GraphRenderer {
    writer: GraphWriter,
    synthetic: NodeIds,
}

impl GraphRenderer {
    /// Create a renderer for `program`; synthetic ids start after its parsed ids
    pub fn new(config: GraphConfig, program: &Program) -> Self {
        Self {
            writer: GraphWriter::new(config),
            synthetic: NodeIds::starting_at(program.node_count),
        }
    }

    pub fn render(mut self, program: &Program) -> AstGraph {
        let header = format!("digraph {} {{", self.writer.config().graph_name);
        let shape = format!("node [shape={}];", self.writer.config().node_shape);
        self.writer.writeln(&header);
        self.writer.writeln(&shape);
        self.writer.indent();

        self.writer.node(program.id.0, "Program");
        for item in &program.items {
            match &item.node {
                Item::Decl(decl) => self.declaration(item.id, decl),
                Item::Stmt(stmt) => self.statement(item.id, stmt),
            }
            self.writer.edge(program.id.0, item.id.0);
        }

        self.writer.dedent();
        self.writer.writeln("}");

        let node_count = self.writer.node_count();
        let edge_count = self.writer.edge_count();
        AstGraph {
            text: self.writer.finish(),
            node_count,
            edge_count,
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self, id: NodeId, decl: &Declaration) {
        match decl {
            Declaration::Const(c) => {
                self.writer.node(id.0, &format!("Const {}", c.name));
                self.child_expr(id, &c.value);
            }
            Declaration::Var(v) => self.writer.node(id.0, &format!("VarDecl {}", v.name)),
            Declaration::Array(a) => self.writer.node(id.0, &format!("Array {}[{}]", a.name, a.size)),
            Declaration::Type(t) => {
                self.writer.node(id.0, &format!("Type {}", t.name));
                for field in &t.fields {
                    let field_id = self.synthetic.fresh();
                    self.writer.node(field_id.0, field);
                    self.writer.edge(id.0, field_id.0);
                }
            }
            Declaration::Function(f) => {
                self.writer.node(id.0, &format!("Function {}({})", f.name, f.params.join(",")));
                self.children(id, &f.body);
            }
            Declaration::Procedure(p) => {
                self.writer.node(id.0, &format!("Procedure {}({})", p.name, p.params.join(",")));
                self.children(id, &p.body);
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self, id: NodeId, stmt: &Statement) {
        match stmt {
            Statement::Assign(a) => {
                self.writer.node(id.0, "Assign");
                self.child_expr(id, &a.target);
                self.child_expr(id, &a.value);
            }
            Statement::If(i) => {
                self.writer.node(id.0, "If");
                self.child_expr(id, &i.condition);
                self.group(id, "Then", &i.then_body);
                if let Some(else_body) = i.else_body.as_ref().filter(|b| !b.is_empty()) {
                    self.group(id, "Else", else_body);
                }
            }
            Statement::While(w) => {
                self.writer.node(id.0, "While");
                self.child_expr(id, &w.condition);
                self.group(id, "Body", &w.body);
            }
            Statement::Return(value) => {
                self.writer.node(id.0, "Return");
                if let Some(value) = value {
                    self.child_expr(id, value);
                }
            }
            Statement::Expr(e) => {
                self.writer.node(id.0, "ExprStmt");
                self.child_expr(id, &e.expr);
                if let Some(block) = &e.block {
                    self.children(id, block);
                }
            }
        }
    }

    /// Synthetic grouping node hanging off `parent`, owning `body`
    fn group(&mut self, parent: NodeId, label: &str, body: &[Spanned<Statement>]) {
        let group_id = self.synthetic.fresh();
        self.writer.node(group_id.0, label);
        self.writer.edge(parent.0, group_id.0);
        self.children(group_id, body);
    }

    fn children(&mut self, parent: NodeId, body: &[Spanned<Statement>]) {
        for stmt in body {
            self.statement(stmt.id, &stmt.node);
            self.writer.edge(parent.0, stmt.id.0);
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn child_expr(&mut self, parent: NodeId, expr: &Spanned<Expr>) {
        self.expr(expr);
        self.writer.edge(parent.0, expr.id.0);
    }

    fn expr(&mut self, expr: &Spanned<Expr>) {
        let id = expr.id;
        match &expr.node {
            Expr::Binary(lhs, op, rhs) => {
                self.writer.node(id.0, &format!("BinOp\n{}", operators::as_str(*op)));
                self.child_expr(id, lhs);
                self.child_expr(id, rhs);
            }
            Expr::Number(value) => self.writer.node(id.0, &format!("Number\n{}", format_number(*value))),
            Expr::Var(name) => self.writer.node(id.0, &format!("Var\n{name}")),
            Expr::Call(name, args) => {
                self.writer.node(id.0, &format!("Call\n{name}()"));
                for arg in args {
                    self.child_expr(id, arg);
                }
            }
            Expr::ArrayAccess(name, index) => {
                self.writer.node(id.0, &format!("ArrayAccess\n{name}"));
                self.child_expr(id, index);
            }
            Expr::FieldAccess(base, field) => {
                self.writer.node(id.0, &format!("FieldAccess\n{field}"));
                self.child_expr(id, base);
            }
        }
    }
}
