use crate::lexer::{Keyword, Position, Token, TokenKind};
use log::{debug, trace};

/// Character scanner over an owned source string.
///
/// `current` is a byte offset into `input` and only ever moves forward.
/// `line` and `column` count characters, both starting at 1.
pub struct Scanner {
    input: String,
    current: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Scanner {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            current: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Scan the whole input. The last token is always `Eof`.
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Pull the next token. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.is_at_end() {
            return Token::eof(self.current_position());
        }

        let token = self.scan_token();
        if token.kind == TokenKind::Invalid {
            debug!("invalid token {:?} at {}", token.lexeme, token.pos);
        } else {
            trace!("{} {:?} at {}", token.kind, token.lexeme, token.pos);
        }
        token
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.current..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.current..].chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek_is_digit(&self, offset: usize) -> bool {
        self.peek_ahead(offset).is_some_and(|ch| ch.is_ascii_digit())
    }

    /// Skips whitespace and `//` line comments, in any order.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_ahead(1) == Some('/') {
                self.skip_line_comment();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|ch| ch != '\n') {
            self.advance();
        }
    }

    fn scan_token(&mut self) -> Token {
        let start_pos = self.current_position();
        let start_idx = self.current;

        let Some(ch) = self.advance() else {
            return Token::eof(start_pos);
        };

        match ch {
            '0'..='9' => return self.scan_number(start_pos, start_idx),
            '"' | '\'' => return self.scan_string_literal(ch, start_pos, start_idx),
            ch if ch.is_ascii_alphabetic() || ch == '_' => {
                return self.scan_identifier_or_keyword(start_pos, start_idx);
            }
            _ => {}
        }

        // Maximal munch: prefer the two-character operator when the pair is known
        let kind = match self.peek().and_then(|next| TokenKind::compound(ch, next)) {
            Some(kind) => {
                self.advance();
                kind
            }
            None => TokenKind::single(ch).unwrap_or(TokenKind::Invalid),
        };

        let lexeme = self.input[start_idx..self.current].to_string();
        Token::new(kind, start_pos, lexeme)
    }

    fn scan_string_literal(&mut self, quote: char, start_pos: Position, start_idx: usize) -> Token {
        let mut value = String::new();

        loop {
            let Some(ch) = self.advance() else {
                return self.unterminated(start_pos, start_idx);
            };

            if ch == quote {
                break;
            }

            if ch == '\\' {
                let Some(escaped) = self.advance() else {
                    return self.unterminated(start_pos, start_idx);
                };
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            } else {
                value.push(ch);
            }
        }

        Token::new(TokenKind::StringLiteral, start_pos, value)
    }

    fn unterminated(&self, start_pos: Position, start_idx: usize) -> Token {
        let lexeme = self.input[start_idx..self.current].to_string();
        Token::new(TokenKind::Invalid, start_pos, lexeme)
    }

    fn scan_number(&mut self, start_pos: Position, start_idx: usize) -> Token {
        while self.peek_is_digit(0) {
            self.advance();
        }

        let mut is_real = false;

        // Fractional part
        if self.peek() == Some('.') && self.peek_is_digit(1) {
            is_real = true;
            self.advance();
            while self.peek_is_digit(0) {
                self.advance();
            }
        }

        // Exponent, with an optional sign
        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_ahead(1), Some('+' | '-'));
            let digits_at = if signed { 2 } else { 1 };
            if self.peek_is_digit(digits_at) {
                is_real = true;
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.peek_is_digit(0) {
                    self.advance();
                }
            }
        }

        let kind = if is_real { TokenKind::Real } else { TokenKind::Integer };
        let lexeme = self.input[start_idx..self.current].to_string();
        Token::new(kind, start_pos, lexeme)
    }

    fn scan_identifier_or_keyword(&mut self, start_pos: Position, start_idx: usize) -> Token {
        while self.peek().is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            self.advance();
        }

        let text = self.input[start_idx..self.current].to_string();

        match Keyword::from_str(&text) {
            Some(keyword) => Token::new(TokenKind::Keyword(keyword), start_pos, text),
            None => Token::new(TokenKind::Identifier, start_pos, text),
        }
    }
}

/// Yields every token including the final `Eof`, then stops.
impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::Eof;
        Some(token)
    }
}

// Convenience function for tokenizing input
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    scanner.scan_all()
}
