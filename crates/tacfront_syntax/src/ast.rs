//! Abstract Syntax Tree definitions for tacfront
//!
//! The tree is a closed set of tagged variants: top-level [`Item`]s are either a [`Declaration`] or a
//! [`Statement`], and statements own [`Expr`] subtrees. Every consumer (generator, graph serializer)
//! matches exhaustively, so adding a variant is a compile error until all of them handle it.

use std::fmt;

use tacfront_core::lang::operators::{self, OperatorId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Identity of one AST node within one compilation.
///
/// Ids are handed out sequentially by [`NodeIds`] in construction order and are only meaningful for
/// graph serialization; nothing in code generation depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential [`NodeId`] allocator owned by a single parse.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering after `count` already-issued ids.
    pub fn starting_at(count: usize) -> Self {
        Self { next: count as u32 }
    }

    pub fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> usize {
        self.next as usize
    }
}

/// A node with source location and identity
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
    pub id: NodeId,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span, id: NodeId) -> Self {
        Self { node, span, id }
    }

    /// Rewrap the payload while keeping span and identity.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            node: f(self.node),
            span: self.span,
            id: self.id,
        }
    }
}

pub type Ident = String;

/// A program is the ordered list of top-level declarations and statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Spanned<Item>>,
    pub id: NodeId,
    /// Number of node ids issued while parsing (the program's own id included).
    pub node_count: usize,
}

/// Anything that may appear at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Decl(Declaration),
    Stmt(Statement),
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Const(ConstDecl),
    Var(VarDecl),
    Array(ArrayDecl),
    Type(TypeDecl),
    Function(FunctionDecl),
    Procedure(ProcedureDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Const(d) => &d.name,
            Declaration::Var(d) => &d.name,
            Declaration::Array(d) => &d.name,
            Declaration::Type(d) => &d.name,
            Declaration::Function(d) => &d.name,
            Declaration::Procedure(d) => &d.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Ident,
    pub value: Spanned<Expr>,
}

/// Plain variable declaration.
///
/// The surface grammar has no `var` keyword; these come from programmatic construction and are
/// hoisted like every other declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDecl {
    pub name: Ident,
    pub size: usize,
}

/// Record type: an ordered list of untyped field names.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: Ident,
    pub fields: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub return_type: Option<Ident>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(Option<Spanned<Expr>>),
    Expr(ExprStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// `Var`, `ArrayAccess` or `FieldAccess`; the parser never produces anything else.
    pub target: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Vec<Spanned<Statement>>,
    pub else_body: Option<Vec<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

/// Expression evaluated for its effect, or a braced grouping block.
///
/// A grouping block `{ ... }` is an `ExprStmt` whose `expr` is a `Number(0)` placeholder and whose
/// `block` holds the nested statements.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Spanned<Expr>,
    pub block: Option<Vec<Spanned<Statement>>>,
}

impl Statement {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Assign(_) => "Assign",
            Statement::If(_) => "If",
            Statement::While(_) => "While",
            Statement::Return(_) => "Return",
            Statement::Expr(_) => "ExprStmt",
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(Box<Spanned<Expr>>, OperatorId, Box<Spanned<Expr>>),
    Number(f64),
    Var(Ident),
    Call(Ident, Vec<Spanned<Expr>>),
    ArrayAccess(Ident, Box<Spanned<Expr>>),
    FieldAccess(Box<Spanned<Expr>>, Ident),
}

impl Expr {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Binary(..) => "BinaryOp",
            Expr::Number(_) => "Number",
            Expr::Var(_) => "Var",
            Expr::Call(..) => "Call",
            Expr::ArrayAccess(..) => "ArrayAccess",
            Expr::FieldAccess(..) => "FieldAccess",
        }
    }
}

/// Render a numeric literal the way listings show it: always with a fractional part (`3.0`, `2.5`).
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary(l, op, r) => write!(f, "({} {} {})", l.node, operators::as_str(*op), r.node),
            Expr::Number(v) => write!(f, "{}", format_number(*v)),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Call(name, args) => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a.node)?;
                }
                write!(f, ")")
            }
            Expr::ArrayAccess(name, idx) => write!(f, "{name}[{}]", idx.node),
            Expr::FieldAccess(base, field) => write!(f, "{}.{field}", base.node),
        }
    }
}
