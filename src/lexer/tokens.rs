use crate::lexer::{LexerError, Position};
use std::fmt;

/// Language keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    While,
    For,
    Return,
    Int,
    Float,
    String,
    Bool,
    True,
    False,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Return => "return",
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::String => "string",
            Keyword::Bool => "bool",
            Keyword::True => "true",
            Keyword::False => "false",
        };
        write!(f, "{}", s)
    }
}

impl Keyword {
    /// Exact, case-sensitive lookup of the full identifier text.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "for" => Some(Keyword::For),
            "return" => Some(Keyword::Return),
            "int" => Some(Keyword::Int),
            "float" => Some(Keyword::Float),
            "string" => Some(Keyword::String),
            "bool" => Some(Keyword::Bool),
            "true" => Some(Keyword::True),
            "false" => Some(Keyword::False),
            _ => None,
        }
    }

    /// Keywords that start a variable declaration.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Keyword::Int | Keyword::Float | Keyword::String | Keyword::Bool
        )
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Punctuation
    OpenParen,          // (
    CloseParen,         // )
    OpenBrace,          // {
    CloseBrace,         // }
    OpenBracket,        // [
    CloseBracket,       // ]
    Semicolon,          // ;
    Comma,              // ,

    // Arithmetic operators
    Plus,               // +
    Minus,              // -
    Asterisk,           // *
    Slash,              // /
    Percent,            // %
    Caret,              // ^

    // Relational operators
    Equal,              // ==
    NotEqual,           // !=
    Less,               // <
    Greater,            // >
    LessEqual,          // <=
    GreaterEqual,       // >=

    // Logical operators
    LogicalAnd,         // &&
    LogicalOr,          // ||

    // Shift operators
    LeftShift,          // <<
    RightShift,         // >>

    // Assignment operators
    Assign,             // =
    ColonAssign,        // :=

    // Literals and identifiers
    Integer,
    Real,
    StringLiteral,
    Identifier,
    Keyword(Keyword),

    // Special tokens
    Invalid,
    Eof,
}

impl TokenKind {
    /// Two-character operators recognised by maximal munch.
    pub fn compound(first: char, second: char) -> Option<Self> {
        match (first, second) {
            ('=', '=') => Some(TokenKind::Equal),
            ('!', '=') => Some(TokenKind::NotEqual),
            ('<', '=') => Some(TokenKind::LessEqual),
            ('>', '=') => Some(TokenKind::GreaterEqual),
            ('&', '&') => Some(TokenKind::LogicalAnd),
            ('|', '|') => Some(TokenKind::LogicalOr),
            (':', '=') => Some(TokenKind::ColonAssign),
            ('<', '<') => Some(TokenKind::LeftShift),
            ('>', '>') => Some(TokenKind::RightShift),
            _ => None,
        }
    }

    /// Single-character symbols. `!`, `&`, `|` and `:` only exist as the
    /// first half of a compound operator.
    pub fn single(ch: char) -> Option<Self> {
        let kind = match ch {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '=' => TokenKind::Assign,
            _ => return None,
        };
        Some(kind)
    }
}

/// A token with position information
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Position, lexeme: String) -> Self {
        Self { kind, pos, lexeme }
    }

    pub fn eof(pos: Position) -> Self {
        Self::new(TokenKind::Eof, pos, String::new())
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Diagnostic for an `Invalid` token, `None` for every other kind.
    pub fn lexical_error(&self) -> Option<LexerError> {
        if self.kind != TokenKind::Invalid {
            return None;
        }
        // Invalid tokens that open with a quote are always unterminated strings
        match self.lexeme.chars().next() {
            Some('"' | '\'') => Some(LexerError::UnterminatedString(self.pos)),
            Some(ch) => Some(LexerError::UnexpectedChar(ch, self.pos)),
            None => Some(LexerError::UnexpectedChar('\0', self.pos)),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::StringLiteral => write!(f, "\"{}\"", self.lexeme),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::OpenParen => write!(f, "("),
            TokenKind::CloseParen => write!(f, ")"),
            TokenKind::OpenBrace => write!(f, "{{"),
            TokenKind::CloseBrace => write!(f, "}}"),
            TokenKind::OpenBracket => write!(f, "["),
            TokenKind::CloseBracket => write!(f, "]"),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Asterisk => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Equal => write!(f, "=="),
            TokenKind::NotEqual => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::LessEqual => write!(f, "<="),
            TokenKind::GreaterEqual => write!(f, ">="),
            TokenKind::LogicalAnd => write!(f, "&&"),
            TokenKind::LogicalOr => write!(f, "||"),
            TokenKind::LeftShift => write!(f, "<<"),
            TokenKind::RightShift => write!(f, ">>"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::ColonAssign => write!(f, ":="),
            TokenKind::Integer => write!(f, "integer"),
            TokenKind::Real => write!(f, "real"),
            TokenKind::StringLiteral => write!(f, "string"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Keyword(kw) => write!(f, "{}", kw),
            TokenKind::Invalid => write!(f, "invalid"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}
