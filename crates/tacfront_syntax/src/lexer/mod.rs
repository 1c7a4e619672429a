//! Lexer for the tacfront language
//!
//! Handles tokenization including:
//! - Keywords (if, else, while, return, function, procedure, const, array, type)
//! - Identifiers and decimal number literals
//! - Operators (`+ - * /` and the relational set) and single-character punctuation
//!
//! ## Notes
//! - Whitespace never produces a token. A newline bumps the line counter and resets the column to 1.
//! - Lexing fails fast: the first unrecognized character aborts the scan with a [`LexError`].
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::LexError;
use tacfront_core::lang::operators::OperatorId;
use tacfront_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for tacfront source code.
///
/// Single forward scan with one character of lookahead (two for the decimal point in numbers).
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token whose lexeme is empty and whose position is
    /// the final line/column reached.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            self.line,
            self.column,
            Span::new(self.current_pos, self.current_pos),
        ));
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), LexError> {
        let start = self.current_pos;
        let (line, column) = (self.line, self.column);

        let Some(c) = self.advance() else {
            return Ok(());
        };

        let at = Position { start, line, column };
        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            '+' => self.add_op(OperatorId::Plus, at),
            '-' => self.add_op(OperatorId::Minus, at),
            '*' => self.add_op(OperatorId::Star, at),
            '/' => self.add_op(OperatorId::Slash, at),
            '<' => self.operator(at, OperatorId::Lt, OperatorId::LtEq),
            '>' => self.operator(at, OperatorId::Gt, OperatorId::GtEq),
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, at);
                } else {
                    self.add_punct(PunctuationId::Assign, at);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, at);
                } else {
                    return Err(LexError::BareBang {
                        line,
                        column,
                        span: Span::new(start, self.current_pos).into(),
                    });
                }
            }

            '0'..='9' => self.scan_number(at),

            _ if is_ident_start(c) => self.scan_identifier(at),

            _ => match punctuation::from_char(c) {
                Some(id) => self.add_punct(id, at),
                None => {
                    return Err(LexError::UnexpectedCharacter {
                        character: c,
                        line,
                        column,
                        span: Span::new(start, self.current_pos).into(),
                    });
                }
            },
        }
        Ok(())
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, at: Position) {
        let lexeme = &self.source[at.start..self.current_pos];
        self.tokens.push(Token::new(
            kind,
            lexeme,
            at.line,
            at.column,
            Span::new(at.start, self.current_pos),
        ));
    }

    fn add_op(&mut self, id: OperatorId, at: Position) {
        self.add_token(TokenKind::Operator(id), at);
    }

    fn add_punct(&mut self, id: PunctuationId, at: Position) {
        self.add_token(TokenKind::Punctuation(id), at);
    }

    /// Emit `compound` when the next character is `=`, otherwise `simple`.
    fn operator(&mut self, at: Position, simple: OperatorId, compound: OperatorId) {
        if self.match_char('=') {
            self.add_op(compound, at);
        } else {
            self.add_op(simple, at);
        }
    }

    // ========================================================================
    // Literal and identifier scanning
    // ========================================================================

    /// Digits, optionally followed by `.` and more digits. A trailing `.` with no digit after it is
    /// left for the next token.
    fn scan_number(&mut self, at: Position) {
        self.eat_digits();
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.eat_digits();
        }
        self.add_token(TokenKind::Number, at);
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn scan_identifier(&mut self, at: Position) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let spelling = &self.source[at.start..self.current_pos];
        match keyword_id(spelling) {
            Some(id) => self.add_token(TokenKind::Keyword(id), at),
            None => self.add_token(TokenKind::Ident, at),
        }
    }
}

/// Where the token being scanned started.
#[derive(Clone, Copy)]
struct Position {
    start: usize,
    line: usize,
    column: usize,
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
