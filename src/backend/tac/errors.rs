//! Error types for TAC generation.
//!
//! Most generation errors are internal consistency failures: the parser only builds shapes the
//! generator knows how to lower, so reaching one of these means the two have drifted apart. Storage
//! exhaustion is the exception; it depends on the sizes a program declares.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::frontend::symbols::AddressSpaceExhausted;

/// Fatal error during TAC generation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerationError {
    #[error("cannot assign to a {kind} expression")]
    #[diagnostic(
        code(tacfront::tac::unsupported_assign_target),
        help("assignment targets are variables, array elements and record fields")
    )]
    UnsupportedAssignTarget {
        kind: &'static str,
        #[label("not assignable")]
        span: SourceSpan,
    },

    #[error("array '{name}' of {length} elements does not fit in the address space")]
    #[diagnostic(code(tacfront::tac::array_too_large))]
    ArrayTooLarge { name: String, length: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    AddressSpaceExhausted(#[from] AddressSpaceExhausted),
}
