/// Statement parsing methods.
///
/// This chunk parses statement forms (`if`, `while`, `return`, grouping blocks) and the ID-led
/// statements (assignments and call statements).
///
/// ## Notes
/// - `if`/`else` branches accept either a braced block or a single statement; `while` bodies must be
///   braced.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// `{ stmt* }`
    fn braced_block(&mut self) -> Result<Vec<Spanned<Statement>>, ParseError> {
        self.expect_punct(PunctuationId::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            stmts.push(self.statement()?);
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(stmts)
    }

    /// A braced block, or a single statement standing in for one.
    fn branch(&mut self) -> Result<Vec<Spanned<Statement>>, ParseError> {
        if self.check_punct(PunctuationId::LBrace) {
            self.braced_block()
        } else {
            Ok(vec![self.statement()?])
        }
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, ParseError> {
        self.nested(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> Result<Spanned<Statement>, ParseError> {
        let start = self.current_span().start;

        let kind = self.peek().kind;
        let stmt = match kind {
            TokenKind::Keyword(KeywordId::If) => self.if_stmt()?,
            TokenKind::Keyword(KeywordId::While) => self.while_stmt()?,
            TokenKind::Keyword(KeywordId::Return) => self.return_stmt()?,
            TokenKind::Punctuation(PunctuationId::LBrace) => self.grouping_block(start)?,
            TokenKind::Ident => self.ident_stmt()?,
            _ => {
                return Err(self.unexpected(vec![
                    TokenKind::Keyword(KeywordId::If),
                    TokenKind::Keyword(KeywordId::While),
                    TokenKind::Keyword(KeywordId::Return),
                    TokenKind::Punctuation(PunctuationId::LBrace),
                    TokenKind::Ident,
                ]));
            }
        };

        let span = self.span_from(start);
        Ok(self.node(stmt, span))
    }

    fn if_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::If)?;
        let condition = self.paren_condition()?;
        let then_body = self.branch()?;
        let else_body = if self.check_keyword(KeywordId::Else) {
            self.advance();
            Some(self.branch()?)
        } else {
            None
        };
        Ok(Statement::If(IfStmt {
            condition,
            then_body,
            else_body,
        }))
    }

    fn while_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::While)?;
        let condition = self.paren_condition()?;
        let body = self.braced_block()?;
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    fn paren_condition(&mut self) -> Result<Spanned<Expr>, ParseError> {
        self.expect_punct(PunctuationId::LParen)?;
        let condition = self.expression()?;
        self.expect_punct(PunctuationId::RParen)?;
        Ok(condition)
    }

    /// `return;` or `return expr;`
    fn return_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::Return)?;
        let value = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(Statement::Return(value))
    }

    /// `{ stmt* }` in statement position: an expression statement carrying a nested list.
    fn grouping_block(&mut self, start: usize) -> Result<Statement, ParseError> {
        let block = self.braced_block()?;
        let span = self.span_from(start);
        let placeholder = self.node(Expr::Number(0.0), span);
        Ok(Statement::Expr(ExprStmt {
            expr: placeholder,
            block: Some(block),
        }))
    }

    /// Statements led by an identifier, disambiguated by the token that follows it.
    fn ident_stmt(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_span().start;
        let name_span = self.current_span();

        if self.peek_next().kind.is_punctuation(PunctuationId::LParen) {
            let call = self.call_expr()?;
            self.expect_punct(PunctuationId::Semicolon)?;
            return Ok(Statement::Expr(ExprStmt { expr: call, block: None }));
        }

        let name = self.identifier()?;
        let next = self.peek().kind;
        let target = match next {
            TokenKind::Punctuation(PunctuationId::Assign) => self.node(Expr::Var(name), name_span),
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket)?;
                let span = self.span_from(start);
                self.node(Expr::ArrayAccess(name, Box::new(index)), span)
            }
            TokenKind::Punctuation(PunctuationId::Dot) => {
                self.advance();
                let base = self.node(Expr::Var(name), name_span);
                let field = self.identifier()?;
                let span = self.span_from(start);
                self.node(Expr::FieldAccess(Box::new(base), field), span)
            }
            _ => {
                return Err(self.unexpected(vec![
                    TokenKind::Punctuation(PunctuationId::Assign),
                    TokenKind::Punctuation(PunctuationId::LParen),
                    TokenKind::Punctuation(PunctuationId::LBracket),
                    TokenKind::Punctuation(PunctuationId::Dot),
                ]));
            }
        };

        self.expect_punct(PunctuationId::Assign)?;
        let value = self.expression()?;
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(Statement::Assign(AssignStmt { target, value }))
    }
}
