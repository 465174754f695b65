use thiserror::Error;
use crate::lexer::{LexerError, Position};

/// Parser error types
///
/// Every variant carries the position of the offending token.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("Unexpected token '{0}' at {1}")]
    UnexpectedToken(String, Position),

    #[error("Expected {expected} but found '{found}' at {pos}")]
    ExpectedToken {
        expected: String,
        found: String,
        pos: Position,
    },

    #[error("Invalid number format '{0}' at {1}")]
    InvalidNumber(String, Position),

    #[error("Lexer error: {0}")]
    Lexical(#[from] LexerError),
}

impl ParserError {
    pub fn position(&self) -> Position {
        match self {
            ParserError::UnexpectedToken(_, pos)
            | ParserError::ExpectedToken { pos, .. }
            | ParserError::InvalidNumber(_, pos) => *pos,
            ParserError::Lexical(err) => err.position(),
        }
    }
}
