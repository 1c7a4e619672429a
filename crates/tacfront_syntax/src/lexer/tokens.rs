//! Token types for the lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for arithmetic and relational operators
//! - `Punctuation(PunctuationId)` for delimiters, separators, `.` and `=`
//!
//! ## Notes
//! - `TokenKind` is `Copy` and payload-free apart from registry ids; the spelling lives in
//!   [`Token::lexeme`].
//! - `Display` renders the upper-case kind names used in listings and diagnostics (`IF`, `ID`, `OP`,
//!   `SEMICOLON`, ...).

use std::fmt;

use crate::ast::Span;
use tacfront_core::lang::keywords::{self, KeywordId};
use tacfront_core::lang::operators::OperatorId;
use tacfront_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
    Ident,
    Number,
    Eof,
}

impl TokenKind {
    /// Upper-case kind name (`IF`, `ID`, `NUMBER`, `OP`, `ASSIGN`, `LPAREN`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(k) => match k {
                KeywordId::If => "IF",
                KeywordId::Else => "ELSE",
                KeywordId::While => "WHILE",
                KeywordId::Return => "RETURN",
                KeywordId::Function => "FUNCTION",
                KeywordId::Procedure => "PROCEDURE",
                KeywordId::Const => "CONST",
                KeywordId::Array => "ARRAY",
                KeywordId::Type => "TYPE",
            },
            TokenKind::Operator(_) => "OP",
            TokenKind::Punctuation(p) => match p {
                PunctuationId::Comma => "COMMA",
                PunctuationId::Semicolon => "SEMICOLON",
                PunctuationId::Colon => "COLON",
                PunctuationId::Dot => "DOT",
                PunctuationId::Assign => "ASSIGN",
                PunctuationId::LParen => "LPAREN",
                PunctuationId::RParen => "RPAREN",
                PunctuationId::LBracket => "LBRACK",
                PunctuationId::RBracket => "RBRACK",
                PunctuationId::LBrace => "LBRACE",
                PunctuationId::RBrace => "RBRACE",
            },
            TokenKind::Ident => "ID",
            TokenKind::Number => "NUMBER",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its kind, spelling and source position.
///
/// `line`/`column` are 1-based and point at the first character of the lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, '{}', {}, {})", self.kind, self.lexeme, self.line, self.column)
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
