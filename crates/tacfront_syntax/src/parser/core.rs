/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Placeholder returned by `peek_next` past the end of an empty token slice.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    line: 1,
    column: 1,
    span: Span { start: 0, end: 0 },
};

/// Deepest nesting of expressions and statements the parser will descend into.
pub const MAX_NESTING: usize = 200;

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass with one token of lookahead; ID-led statements peek one further.
/// - Node ids are handed out by the parser's own [`NodeIds`], children before their parent.
/// - Recursion is bounded by [`MAX_NESTING`]; deeper input is a [`ParseError::NestingTooDeep`].
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    ids: NodeIds,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `tacfront_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            ids: NodeIds::new(),
            depth: 0,
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] encountered; no partial tree is produced.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.item()?);
        }

        let id = self.ids.fresh();
        Ok(Program {
            items,
            id,
            node_count: self.ids.issued(),
        })
    }
}
