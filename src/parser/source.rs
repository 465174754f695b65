use crate::lexer::{Position, Scanner, Token};

/// Anything the parser can pull tokens from.
///
/// Implementations must keep returning an `Eof` token once they run dry.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Pull tokens straight from a live scanner.
impl TokenSource for Scanner {
    fn next_token(&mut self) -> Token {
        Scanner::next_token(self)
    }
}

/// A pre-scanned token sequence.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    last_pos: Position,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            last_pos: Position::start(),
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.last_pos = token.pos;
                token
            }
            // A sequence without its own Eof still ends cleanly
            None => Token::eof(self.last_pos),
        }
    }
}

