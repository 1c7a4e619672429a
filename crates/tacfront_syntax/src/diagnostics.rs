//! Diagnostics raised by the syntax frontend.
//!
//! Both stages fail fast: the first problem aborts the stage and is returned as a single error value.
//! Every error carries the 1-based line/column of the offending character or token plus a byte span
//! that `miette` can render against the source text.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::lexer::TokenKind;

/// Failure while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexError {
    #[error("expected '=' after '!' at line {line}, column {column}")]
    #[diagnostic(code(tacfront::lex::bare_bang), help("`!` is only valid as part of `!=`"))]
    BareBang {
        line: usize,
        column: usize,
        #[label("this `!` is not followed by `=`")]
        span: SourceSpan,
    },

    #[error("unexpected character {character:?} at line {line}, column {column}")]
    #[diagnostic(code(tacfront::lex::unexpected_character))]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        #[label("not part of any token")]
        span: SourceSpan,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::BareBang { line, .. } | LexError::UnexpectedCharacter { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexError::BareBang { column, .. } | LexError::UnexpectedCharacter { column, .. } => *column,
        }
    }
}

/// The token kinds a parse step would have accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected(pub Vec<TokenKind>);

impl Expected {
    pub fn one(kind: TokenKind) -> Self {
        Self(vec![kind])
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0.contains(&kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("nothing"),
            [only] => write!(f, "{only}"),
            many => {
                f.write_str("one of ")?;
                for (i, kind) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{kind}")?;
                }
                Ok(())
            }
        }
    }
}

/// Failure while turning tokens into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error("expected {expected} but found {found} at line {line}, column {column}")]
    #[diagnostic(code(tacfront::parse::unexpected_token))]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
        #[label("unexpected token")]
        span: SourceSpan,
    },

    #[error("invalid literal '{lexeme}' at line {line}, column {column}: {reason}")]
    #[diagnostic(code(tacfront::parse::invalid_literal))]
    InvalidLiteral {
        lexeme: String,
        reason: String,
        line: usize,
        column: usize,
        #[label("invalid literal")]
        span: SourceSpan,
    },

    #[error("nesting deeper than {limit} levels at line {line}, column {column}")]
    #[diagnostic(
        code(tacfront::parse::nesting_too_deep),
        help("split the expression or block into smaller pieces")
    )]
    NestingTooDeep {
        limit: usize,
        line: usize,
        column: usize,
        #[label("limit reached here")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::InvalidLiteral { line, .. }
            | ParseError::NestingTooDeep { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { column, .. }
            | ParseError::InvalidLiteral { column, .. }
            | ParseError::NestingTooDeep { column, .. } => *column,
        }
    }

    /// Kind of the token that violated expectation, if this is a token mismatch.
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { found, .. } => Some(*found),
            ParseError::InvalidLiteral { .. } | ParseError::NestingTooDeep { .. } => None,
        }
    }
}
