//! Toy language front end
//!
//! A scanner and a recursive-descent parser for a small imperative language
//! with typed declarations, assignment, `if`/`while` and function calls.

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, Keyword, LexerError, Position, Scanner, Token, TokenKind};
pub use parser::{
    parse_source, BinaryOp, Node, NodeKind, ParseOutcome, Parser, ParserError, TokenSource,
    TokenStream, TypeName,
};
