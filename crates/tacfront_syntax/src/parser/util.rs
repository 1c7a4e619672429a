/// Miscellaneous parser utilities.
///
/// Identifier and literal helpers shared by the declaration, statement and expression chunks.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, ParseError> {
        let tok = self.expect(TokenKind::Ident)?;
        Ok(tok.lexeme.clone())
    }

    fn identifier_list(&mut self) -> Result<Vec<Ident>, ParseError> {
        let mut idents = vec![self.identifier()?];
        while self.match_punct(PunctuationId::Comma) {
            idents.push(self.identifier()?);
        }
        Ok(idents)
    }

    fn number_literal(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let tok = self.expect(TokenKind::Number)?;
        let span = tok.span;
        let value = tok.lexeme.parse::<f64>().map_err(|e| ParseError::InvalidLiteral {
            lexeme: tok.lexeme.clone(),
            reason: e.to_string(),
            line: tok.line,
            column: tok.column,
            span: tok.span.into(),
        })?;
        Ok(self.node(Expr::Number(value), span))
    }
}
