//! AST graph serializer
//!
//! Renders a parsed [`Program`] as directed-graph text (DOT syntax) for an external tree viewer:
//! - one `nID [label="..."];` statement per node
//! - one `nPARENT -> nCHILD;` statement per parent/child link
//! - label line breaks are written as the `\n` escape
//!
//! Parsed nodes keep the ids the parser assigned; the grouping nodes added for readability
//! (`Then`, `Else`, `Body`, record fields) are numbered after them.

mod config;
mod render;
mod writer;

pub use config::GraphConfig;
pub use render::{AstGraph, GraphRenderer};
pub use writer::escape_label;

use crate::frontend::ast::{Declaration, Expr, Item, Program, Spanned, Statement};

/// Render `program` as graph text with default settings
pub fn to_dot(program: &Program) -> String {
    to_dot_with_config(program, GraphConfig::default())
}

/// Render `program` as graph text with custom configuration
pub fn to_dot_with_config(program: &Program, config: GraphConfig) -> String {
    render_graph(program, config).text
}

/// Render `program` and report how many nodes and edges were written
pub fn render_graph(program: &Program, config: GraphConfig) -> AstGraph {
    GraphRenderer::new(config, program).render(program)
}

/// Number of parent/child links in the rendered tree, counted from the AST alone.
///
/// Grouping nodes count as real nodes: an `if` with an else branch contributes an edge to its
/// condition, one to `Then`, one to `Else`, plus one per branch statement.
pub fn tree_edge_count(program: &Program) -> usize {
    program
        .items
        .iter()
        .map(|item| {
            1 + match &item.node {
                Item::Decl(decl) => decl_edges(decl),
                Item::Stmt(stmt) => stmt_edges(stmt),
            }
        })
        .sum()
}

fn decl_edges(decl: &Declaration) -> usize {
    match decl {
        Declaration::Const(c) => 1 + expr_edges(&c.value.node),
        Declaration::Var(_) | Declaration::Array(_) => 0,
        Declaration::Type(t) => t.fields.len(),
        Declaration::Function(f) => block_edges(&f.body),
        Declaration::Procedure(p) => block_edges(&p.body),
    }
}

fn block_edges(body: &[Spanned<Statement>]) -> usize {
    body.iter().map(|s| 1 + stmt_edges(&s.node)).sum()
}

fn stmt_edges(stmt: &Statement) -> usize {
    match stmt {
        Statement::Assign(a) => 2 + expr_edges(&a.target.node) + expr_edges(&a.value.node),
        Statement::If(i) => {
            let else_edges = match &i.else_body {
                Some(body) if !body.is_empty() => 1 + block_edges(body),
                _ => 0,
            };
            1 + expr_edges(&i.condition.node) + 1 + block_edges(&i.then_body) + else_edges
        }
        Statement::While(w) => 1 + expr_edges(&w.condition.node) + 1 + block_edges(&w.body),
        Statement::Return(value) => value.as_ref().map_or(0, |v| 1 + expr_edges(&v.node)),
        Statement::Expr(e) => 1 + expr_edges(&e.expr.node) + e.block.as_deref().map_or(0, block_edges),
    }
}

fn expr_edges(expr: &Expr) -> usize {
    match expr {
        Expr::Binary(lhs, _, rhs) => 2 + expr_edges(&lhs.node) + expr_edges(&rhs.node),
        Expr::Number(_) | Expr::Var(_) => 0,
        Expr::Call(_, args) => args.iter().map(|a| 1 + expr_edges(&a.node)).sum(),
        Expr::ArrayAccess(_, index) => 1 + expr_edges(&index.node),
        Expr::FieldAccess(base, _) => 1 + expr_edges(&base.node),
    }
}
