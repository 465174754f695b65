use crate::lexer::{Keyword, Scanner, Token, TokenKind};
use crate::parser::{BinaryOp, Node, NodeKind, ParserError, TokenSource, TokenStream};
use std::collections::VecDeque;

/// Recursive-descent parser over any [`TokenSource`].
///
/// Tokens are pulled lazily into a lookahead buffer that always holds at
/// least the current token.
pub struct Parser {
    source: Box<dyn TokenSource>,
    lookahead: VecDeque<Token>,
}

impl Parser {
    /// Parser over a pre-scanned token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::from_source(TokenStream::new(tokens))
    }

    /// Parser that pulls tokens from the scanner on demand.
    pub fn from_scanner(scanner: Scanner) -> Self {
        Self::from_source(scanner)
    }

    pub fn from_source(source: impl TokenSource + 'static) -> Self {
        let mut parser = Self {
            source: Box::new(source),
            lookahead: VecDeque::new(),
        };
        parser.fill(0);
        parser
    }

    fn fill(&mut self, offset: usize) {
        while self.lookahead.len() <= offset {
            let token = self.source.next_token();
            self.lookahead.push_back(token);
        }
    }

    // Helper methods

    pub(crate) fn peek(&self) -> &Token {
        &self.lookahead[0]
    }

    pub(crate) fn peek_ahead(&mut self, offset: usize) -> &Token {
        self.fill(offset);
        &self.lookahead[offset]
    }

    /// Consume the current token. `Eof` is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        if self.is_at_end() {
            return self.peek().clone();
        }
        let token = self.lookahead.pop_front().unwrap_or_else(|| Token::eof(Default::default()));
        self.fill(0);
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_keyword(keyword)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParserError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(expected))
        }
    }

    pub(crate) fn expected(&self, expected: &str) -> ParserError {
        let token = self.peek();
        ParserError::ExpectedToken {
            expected: expected.to_string(),
            found: token.to_string(),
            pos: token.pos,
        }
    }

    /// Parse an expression
    pub fn parse_expression(&mut self) -> Result<Node, ParserError> {
        self.parse_comparison()
    }

    /// Parse comparison expressions (==, !=, <, >, <=, >=)
    fn parse_comparison(&mut self) -> Result<Node, ParserError> {
        self.parse_binary_expr(
            Self::parse_additive,
            &[
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
            ],
        )
    }

    /// Parse additive expressions (+, -)
    fn parse_additive(&mut self) -> Result<Node, ParserError> {
        self.parse_binary_expr(Self::parse_multiplicative, &[TokenKind::Plus, TokenKind::Minus])
    }

    /// Parse multiplicative expressions (*, /)
    fn parse_multiplicative(&mut self) -> Result<Node, ParserError> {
        self.parse_binary_expr(Self::parse_exponent, &[TokenKind::Asterisk, TokenKind::Slash])
    }

    /// Generic left-associative binary expression parser
    fn parse_binary_expr<F>(&mut self, next_level: F, operators: &[TokenKind]) -> Result<Node, ParserError>
    where
        F: Fn(&mut Self) -> Result<Node, ParserError>,
    {
        let mut left = next_level(self)?;

        while operators.iter().any(|op| self.check(*op)) {
            let op_token = self.advance();
            let op = self.token_to_binary_op(&op_token)?;
            let right = next_level(self)?;
            let pos = left.pos;

            left = Node::new(
                NodeKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                pos,
            );
        }

        Ok(left)
    }

    fn token_to_binary_op(&self, token: &Token) -> Result<BinaryOp, ParserError> {
        BinaryOp::from_token(token.kind)
            .ok_or_else(|| ParserError::UnexpectedToken(token.lexeme.clone(), token.pos))
    }

    /// Parse exponent expressions. `^` is right-associative: `a^b^c` is `a^(b^c)`.
    fn parse_exponent(&mut self) -> Result<Node, ParserError> {
        let base = self.parse_primary()?;

        if !self.check(TokenKind::Caret) {
            return Ok(base);
        }

        self.advance(); // consume '^'
        let exponent = self.parse_exponent()?;
        let pos = base.pos;

        Ok(Node::new(
            NodeKind::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            },
            pos,
        ))
    }

    /// Parse function call `name(arg, ...)`, without a trailing semicolon
    pub(crate) fn parse_function_call(&mut self) -> Result<Node, ParserError> {
        let name_token = self.expect(TokenKind::Identifier, "function name")?;
        self.expect(TokenKind::OpenParen, "'('")?;

        let mut args = Vec::new();

        if !self.check(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expression()?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::CloseParen, "')'")?;

        Ok(Node::new(
            NodeKind::FunctionCall {
                name: name_token.lexeme,
                args,
            },
            name_token.pos,
        ))
    }

    /// Parse primary expressions (literals, identifiers, calls, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Node, ParserError> {
        let pos = self.peek().pos;
        let kind = self.peek().kind;

        match kind {
            TokenKind::Integer | TokenKind::Real => {
                let token = self.advance();
                let value: f64 = token
                    .lexeme
                    .parse()
                    .map_err(|_| ParserError::InvalidNumber(token.lexeme.clone(), pos))?;
                Ok(Node::new(NodeKind::Number(value), pos))
            }

            TokenKind::StringLiteral => {
                let token = self.advance();
                Ok(Node::new(NodeKind::StringLiteral(token.lexeme), pos))
            }

            TokenKind::Identifier => {
                if self.peek_ahead(1).kind == TokenKind::OpenParen {
                    return self.parse_function_call();
                }
                let token = self.advance();
                Ok(Node::new(NodeKind::Identifier(token.lexeme), pos))
            }

            // Boolean literals are plain names
            TokenKind::Keyword(Keyword::True | Keyword::False) => {
                let token = self.advance();
                Ok(Node::new(NodeKind::Identifier(token.lexeme), pos))
            }

            TokenKind::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen, "')'")?;
                Ok(expr)
            }

            // Statement terminators stay put so recovery can resync on them
            TokenKind::Semicolon | TokenKind::CloseBrace | TokenKind::Eof => {
                Err(self.expected("expression"))
            }

            TokenKind::Invalid => {
                let token = self.advance();
                let err = token
                    .lexical_error()
                    .map(ParserError::Lexical)
                    .unwrap_or_else(|| ParserError::UnexpectedToken(token.lexeme.clone(), pos));
                Err(err)
            }

            _ => {
                let token = self.advance();
                Err(ParserError::UnexpectedToken(token.lexeme, pos))
            }
        }
    }
}
