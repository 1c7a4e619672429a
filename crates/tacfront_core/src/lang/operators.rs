//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the parser's precedence
//! climber needs: binding power, associativity, and whether the operator may also appear in prefix
//! position.
//!
//! ## Notes
//! - `=` is not an operator here; assignment is punctuation (see [`crate::lang::punctuation`]).
//! - Precedence is a relative ordering where higher binds tighter.
//!
//! ## Examples
//! ```rust
//! use tacfront_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("<="), Some(OperatorId::LtEq));
//! assert!(operators::precedence(OperatorId::Star) > operators::precedence(OperatorId::Plus));
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Relational
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    /// Whether the operator is also accepted as a unary prefix (`-x`, `+x`).
    pub prefix: bool,
}

/// Binding power of the relational tier.
pub const RELATIONAL: u8 = 10;
/// Binding power of the additive tier.
pub const ADDITIVE: u8 = 20;
/// Binding power of the multiplicative tier.
pub const MULTIPLICATIVE: u8 = 30;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", ADDITIVE, true),
    op(OperatorId::Minus, "-", ADDITIVE, true),
    op(OperatorId::Star, "*", MULTIPLICATIVE, false),
    op(OperatorId::Slash, "/", MULTIPLICATIVE, false),
    // Relational
    op(OperatorId::EqEq, "==", RELATIONAL, false),
    op(OperatorId::NotEq, "!=", RELATIONAL, false),
    op(OperatorId::Lt, "<", RELATIONAL, false),
    op(OperatorId::Gt, ">", RELATIONAL, false),
    op(OperatorId::LtEq, "<=", RELATIONAL, false),
    op(OperatorId::GtEq, ">=", RELATIONAL, false),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Binding power of an infix use of `id`.
pub fn precedence(id: OperatorId) -> u8 {
    info_for(id).precedence
}

/// Return `true` if `id` may appear as a unary prefix.
pub fn is_prefix(id: OperatorId) -> bool {
    info_for(id).prefix
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, precedence: u8, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity: Associativity::Left,
        prefix,
    }
}
