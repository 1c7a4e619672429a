/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_next`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Building errors and spanned nodes
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`] (or the stream is exhausted).
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        self.tokens
            .get(self.pos + 1)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        let idx = self.pos;
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.tokens
            .get(idx)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(vec![kind]))
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<&Token, ParseError> {
        self.expect(TokenKind::Keyword(id))
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<&Token, ParseError> {
        self.expect(TokenKind::Punctuation(id))
    }

    /// Build an error pointing at the current token.
    fn unexpected(&self, expected: Vec<TokenKind>) -> ParseError {
        let tok = self.peek();
        ParseError::UnexpectedToken {
            expected: Expected(expected),
            found: tok.kind,
            lexeme: tok.lexeme.clone(),
            line: tok.line,
            column: tok.column,
            span: tok.span.into(),
        }
    }

    /// Run `f` one nesting level deeper, failing once [`MAX_NESTING`] is exceeded.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            let tok = self.peek();
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                line: tok.line,
                column: tok.column,
                span: tok.span.into(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: usize) -> Span {
        let end = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(tok) => tok.span.end,
            None => start,
        };
        Span::new(start, end.max(start))
    }

    /// Wrap a finished node, giving it the next id.
    fn node<T>(&mut self, node: T, span: Span) -> Spanned<T> {
        Spanned::new(node, span, self.ids.fresh())
    }
}
