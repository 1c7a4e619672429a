/// Declaration parsing methods.
///
/// This chunk dispatches top-level items and parses the declaration forms: `const`, `array`,
/// `type` and the two routine kinds (`function` / `procedure`).
///
/// ## Notes
/// - Declarations only appear at the top level; routine bodies are statement lists.
impl<'a> Parser<'a> {
    // ========================================================================
    // Top-level items
    // ========================================================================

    fn item(&mut self) -> Result<Spanned<Item>, ParseError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Keyword(KeywordId::Const)
            | TokenKind::Keyword(KeywordId::Array)
            | TokenKind::Keyword(KeywordId::Type)
            | TokenKind::Keyword(KeywordId::Function)
            | TokenKind::Keyword(KeywordId::Procedure) => Ok(self.declaration()?.map(Item::Decl)),
            TokenKind::Keyword(KeywordId::If)
            | TokenKind::Keyword(KeywordId::While)
            | TokenKind::Keyword(KeywordId::Return)
            | TokenKind::Punctuation(PunctuationId::LBrace)
            | TokenKind::Ident => Ok(self.statement()?.map(Item::Stmt)),
            _ => Err(self.unexpected(vec![
                TokenKind::Keyword(KeywordId::Const),
                TokenKind::Keyword(KeywordId::Function),
                TokenKind::Keyword(KeywordId::Procedure),
                TokenKind::Keyword(KeywordId::Array),
                TokenKind::Keyword(KeywordId::Type),
                TokenKind::Keyword(KeywordId::If),
                TokenKind::Keyword(KeywordId::While),
                TokenKind::Keyword(KeywordId::Return),
                TokenKind::Punctuation(PunctuationId::LBrace),
                TokenKind::Ident,
            ])),
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self) -> Result<Spanned<Declaration>, ParseError> {
        let start = self.current_span().start;

        let kind = self.peek().kind;
        let decl = match kind {
            TokenKind::Keyword(KeywordId::Const) => Declaration::Const(self.const_decl()?),
            TokenKind::Keyword(KeywordId::Array) => Declaration::Array(self.array_decl()?),
            TokenKind::Keyword(KeywordId::Type) => Declaration::Type(self.type_decl()?),
            TokenKind::Keyword(KeywordId::Function) => Declaration::Function(self.function_decl()?),
            _ => Declaration::Procedure(self.procedure_decl()?),
        };

        let span = self.span_from(start);
        Ok(self.node(decl, span))
    }

    /// `const NAME = expr;`
    fn const_decl(&mut self) -> Result<ConstDecl, ParseError> {
        self.expect_keyword(KeywordId::Const)?;
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::Assign)?;
        let value = self.expression()?;
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(ConstDecl { name, value })
    }

    /// `array NAME[SIZE];` where SIZE is an integer literal.
    fn array_decl(&mut self) -> Result<ArrayDecl, ParseError> {
        self.expect_keyword(KeywordId::Array)?;
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LBracket)?;
        let size = self.array_size()?;
        self.expect_punct(PunctuationId::RBracket)?;
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(ArrayDecl { name, size })
    }

    fn array_size(&mut self) -> Result<usize, ParseError> {
        let tok = self.expect(TokenKind::Number)?;
        tok.lexeme.parse::<usize>().map_err(|_| ParseError::InvalidLiteral {
            lexeme: tok.lexeme.clone(),
            reason: "array size must be an integer".to_string(),
            line: tok.line,
            column: tok.column,
            span: tok.span.into(),
        })
    }

    /// `type NAME { FIELD; FIELD; ... }`
    fn type_decl(&mut self) -> Result<TypeDecl, ParseError> {
        self.expect_keyword(KeywordId::Type)?;
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LBrace)?;
        let mut fields = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            if !self.check(TokenKind::Ident) {
                return Err(self.unexpected(vec![TokenKind::Ident, TokenKind::Punctuation(PunctuationId::RBrace)]));
            }
            fields.push(self.identifier()?);
            self.expect_punct(PunctuationId::Semicolon)?;
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(TypeDecl { name, fields })
    }

    fn function_decl(&mut self) -> Result<FunctionDecl, ParseError> {
        self.expect_keyword(KeywordId::Function)?;
        let (name, params, body) = self.routine()?;
        Ok(FunctionDecl {
            name,
            params,
            return_type: None,
            body,
        })
    }

    fn procedure_decl(&mut self) -> Result<ProcedureDecl, ParseError> {
        self.expect_keyword(KeywordId::Procedure)?;
        let (name, params, body) = self.routine()?;
        Ok(ProcedureDecl { name, params, body })
    }

    /// Shared tail of both routine kinds: `NAME(PARAM, ...) { stmt* }`.
    fn routine(&mut self) -> Result<(Ident, Vec<Ident>, Vec<Spanned<Statement>>), ParseError> {
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LParen)?;
        let params = if self.check_punct(PunctuationId::RParen) {
            Vec::new()
        } else {
            self.identifier_list()?
        };
        self.expect_punct(PunctuationId::RParen)?;
        let body = self.braced_block()?;
        Ok((name, params, body))
    }
}
