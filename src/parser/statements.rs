use crate::lexer::{tokenize, Keyword, TokenKind};
use crate::parser::expressions::Parser;
use crate::parser::{Node, NodeKind, ParserError, TypeName};
use log::{debug, warn};

/// Result of a recovering parse: every statement that parsed cleanly, plus
/// one error per statement that had to be skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    pub statements: Vec<Node>,
    pub errors: Vec<ParserError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scan and parse `source` with statement-level error recovery.
pub fn parse_source(source: &str) -> ParseOutcome {
    Parser::new(tokenize(source)).parse_program()
}

impl Parser {
    /// Parse a complete program, recovering from errors.
    ///
    /// After a failed statement the parser skips to the next `;` (or the end
    /// of input) and carries on with the statement after it.
    pub fn parse_program(&mut self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        while !self.is_at_end() {
            let stray = self.at_stray_terminator();
            match self.parse_statement() {
                Ok(stmt) => outcome.statements.push(stmt),
                Err(err) => {
                    warn!("{}", err);
                    outcome.errors.push(err);
                    // A stray terminator was already skipped
                    if !stray {
                        self.synchronize();
                    }
                }
            }
        }

        debug!(
            "parsed {} statements with {} errors",
            outcome.statements.len(),
            outcome.errors.len()
        );
        outcome
    }

    /// Parse a complete program, stopping at the first error.
    /// # Errors
    /// The first syntax error encountered.
    pub fn try_parse_program(&mut self) -> Result<Vec<Node>, ParserError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Skip tokens up to and including the next `;`.
    fn synchronize(&mut self) {
        let mut skipped = 0;
        while !self.check(TokenKind::Semicolon) && !self.is_at_end() {
            self.advance();
            skipped += 1;
        }
        self.match_token(TokenKind::Semicolon);
        debug!("resynchronized after skipping {} tokens", skipped);
    }

    fn at_stray_terminator(&self) -> bool {
        self.check(TokenKind::Semicolon) || self.check(TokenKind::CloseBrace)
    }

    /// Parse a statement
    ///
    /// Every call short of end of input consumes at least one token, even
    /// when it fails, so callers can retry it in a loop.
    pub fn parse_statement(&mut self) -> Result<Node, ParserError> {
        if self.at_stray_terminator() {
            let err = self.expected("statement");
            self.advance();
            return Err(err);
        }

        let kind = self.peek().kind;
        let stmt = match kind {
            // Variable declaration (starts with type)
            TokenKind::Keyword(keyword) if keyword.is_type() => self.parse_var_declaration(),

            // If statement
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),

            // While loop
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),

            // Call or assignment, decided by the token after the name
            TokenKind::Identifier => {
                let next = self.peek_ahead(1).kind;
                match next {
                    TokenKind::OpenParen => self.parse_call_statement(),
                    TokenKind::Assign | TokenKind::ColonAssign => self.parse_assignment_statement(),
                    _ => self.parse_expression_statement(),
                }
            }

            // Block statement
            TokenKind::OpenBrace => {
                let pos = self.peek().pos;
                let statements = self.parse_block()?;
                Ok(Node::new(NodeKind::Block(statements), pos))
            }

            _ => self.parse_expression_statement(),
        }?;

        debug!("statement at {}", stmt.pos);
        Ok(stmt)
    }

    /// Parse a block `{ ... }` and return its statements
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Node>, ParserError> {
        self.expect(TokenKind::OpenBrace, "'{'")?;

        let mut statements = Vec::new();

        while !self.check(TokenKind::CloseBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::CloseBrace, "'}'")?;

        Ok(statements)
    }

    /// Body of an `if`/`while` branch: a block, or a single statement
    fn parse_body(&mut self) -> Result<Vec<Node>, ParserError> {
        if self.check(TokenKind::OpenBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    /// Parse `( condition )` after `if` or `while`
    fn parse_condition(&mut self, keyword: &str) -> Result<Node, ParserError> {
        self.expect(TokenKind::OpenParen, &format!("'(' after '{}'", keyword))?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::CloseParen, "')' after condition")?;
        Ok(condition)
    }

    /// Parse an if statement
    fn parse_if_statement(&mut self) -> Result<Node, ParserError> {
        let pos = self.advance().pos; // consume 'if'

        let condition = self.parse_condition("if")?;
        let then_body = self.parse_body()?;

        let else_body = if self.check_keyword(Keyword::Else) {
            self.advance(); // consume 'else'
            self.parse_body()?
        } else {
            Vec::new()
        };

        Ok(Node::new(
            NodeKind::If {
                condition: Box::new(condition),
                then_body,
                else_body,
            },
            pos,
        ))
    }

    /// Parse a while loop
    fn parse_while_statement(&mut self) -> Result<Node, ParserError> {
        let pos = self.advance().pos; // consume 'while'

        let condition = self.parse_condition("while")?;
        let body = self.parse_body()?;

        Ok(Node::new(
            NodeKind::While {
                condition: Box::new(condition),
                body,
            },
            pos,
        ))
    }

    /// Parse variable declaration `type name [= expr];`
    fn parse_var_declaration(&mut self) -> Result<Node, ParserError> {
        let type_token = self.advance();
        let pos = type_token.pos;

        let var_type = match type_token.kind {
            TokenKind::Keyword(keyword) => TypeName::from_keyword(keyword),
            _ => None,
        }
        .ok_or_else(|| ParserError::UnexpectedToken(type_token.lexeme.clone(), pos))?;

        let name = self.expect(TokenKind::Identifier, "variable name")?.lexeme;

        // Parse optional initializer
        let initializer = if self.match_token(TokenKind::Assign) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "';' after variable declaration")?;

        Ok(Node::new(
            NodeKind::VarDeclaration {
                var_type,
                name,
                initializer,
            },
            pos,
        ))
    }

    /// Parse assignment statement. `name = expr;` needs the semicolon,
    /// `name := expr` takes it optionally.
    fn parse_assignment_statement(&mut self) -> Result<Node, ParserError> {
        let name_token = self.expect(TokenKind::Identifier, "variable name")?;
        let op_token = self.advance();

        let value = self.parse_expression()?;

        if op_token.kind == TokenKind::ColonAssign {
            self.match_token(TokenKind::Semicolon);
        } else {
            self.expect(TokenKind::Semicolon, "';' after assignment")?;
        }

        Ok(Node::new(
            NodeKind::Assignment {
                name: name_token.lexeme,
                value: Box::new(value),
            },
            name_token.pos,
        ))
    }

    /// Parse call statement `name(args);`
    fn parse_call_statement(&mut self) -> Result<Node, ParserError> {
        let call = self.parse_function_call()?;
        self.expect(TokenKind::Semicolon, "';' after function call")?;
        Ok(call)
    }

    /// Parse expression statement; the semicolon is optional
    fn parse_expression_statement(&mut self) -> Result<Node, ParserError> {
        let expr = self.parse_expression()?;
        self.match_token(TokenKind::Semicolon);
        Ok(expr)
    }
}
