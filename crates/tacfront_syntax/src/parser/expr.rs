/// Expression parsing methods.
///
/// This chunk implements the expression grammar:
/// - binary operators by precedence climbing over the operator registry (relational, additive,
///   multiplicative; all left-associative)
/// - unary prefix `+`/`-`, desugared to `0 OP operand`
/// - postfix/primary forms: literals, variables, calls, `name[index]`, `name.field` and
///   parenthesized sub-expressions
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, ParseError> {
        self.nested(|p| p.binary(operators::RELATIONAL))
    }

    /// Parse a left fold of binary operators whose precedence is at least `min_prec`.
    fn binary(&mut self, min_prec: u8) -> Result<Spanned<Expr>, ParseError> {
        let start = self.current_span().start;
        let mut left = self.unary()?;

        while let Some(op) = self.peek().operator_id() {
            let info = operators::info_for(op);
            if info.precedence < min_prec {
                break;
            }
            self.advance();
            let next_min = match info.associativity {
                operators::Associativity::Left => info.precedence + 1,
                operators::Associativity::Right => info.precedence,
            };
            let right = self.binary(next_min)?;
            let span = self.span_from(start);
            left = self.node(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let Some(op) = self.peek().kind.prefix_operator() else {
            return self.postfix();
        };

        let op_span = self.current_span();
        self.advance();
        let operand = self.nested(Self::unary)?;
        let zero = self.node(Expr::Number(0.0), op_span);
        let span = self.span_from(op_span.start);
        Ok(self.node(Expr::Binary(Box::new(zero), op, Box::new(operand)), span))
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.current_span().start;
        let kind = self.peek().kind;

        match kind {
            TokenKind::Number => self.number_literal(),
            TokenKind::Ident if self.peek_next().kind.is_punctuation(PunctuationId::LParen) => self.call_expr(),
            TokenKind::Ident => {
                let name_span = self.current_span();
                let name = self.identifier()?;
                if self.match_punct(PunctuationId::LBracket) {
                    let index = self.expression()?;
                    self.expect_punct(PunctuationId::RBracket)?;
                    let span = self.span_from(start);
                    Ok(self.node(Expr::ArrayAccess(name, Box::new(index)), span))
                } else if self.match_punct(PunctuationId::Dot) {
                    let base = self.node(Expr::Var(name), name_span);
                    let field = self.identifier()?;
                    let span = self.span_from(start);
                    Ok(self.node(Expr::FieldAccess(Box::new(base), field), span))
                } else {
                    Ok(self.node(Expr::Var(name), name_span))
                }
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected(vec![
                TokenKind::Number,
                TokenKind::Ident,
                TokenKind::Punctuation(PunctuationId::LParen),
            ])),
        }
    }

    /// `NAME(arg, ...)`
    fn call_expr(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.current_span().start;
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LParen)?;

        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            args.push(self.expression()?);
            while self.match_punct(PunctuationId::Comma) {
                args.push(self.expression()?);
            }
        }
        self.expect_punct(PunctuationId::RParen)?;

        let span = self.span_from(start);
        Ok(self.node(Expr::Call(name, args), span))
    }
}
