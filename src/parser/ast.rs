use crate::lexer::{Keyword, Position, TokenKind};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    // Comparison
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Asterisk => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Caret => Some(BinaryOp::Pow),
            TokenKind::Equal => Some(BinaryOp::Equal),
            TokenKind::NotEqual => Some(BinaryOp::NotEqual),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::LessEqual => Some(BinaryOp::LessEqual),
            TokenKind::GreaterEqual => Some(BinaryOp::GreaterEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Declared type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Float,
    String,
    Bool,
}

impl TypeName {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Int => Some(TypeName::Int),
            Keyword::Float => Some(TypeName::Float),
            Keyword::String => Some(TypeName::String),
            Keyword::Bool => Some(TypeName::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::String => "string",
            TypeName::Bool => "bool",
        };
        f.write_str(s)
    }
}

/// Node variants
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Number(f64),
    StringLiteral(String),
    Identifier(String),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
    Assignment {
        name: String,
        value: Box<Node>,
    },
    VarDeclaration {
        var_type: TypeName,
        name: String,
        initializer: Option<Box<Node>>,
    },
    If {
        condition: Box<Node>,
        then_body: Vec<Node>,
        else_body: Vec<Node>,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    Block(Vec<Node>),
}

/// AST node with the position of its first token
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Position,
}

impl Node {
    pub fn new(kind: NodeKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// True for nodes that can appear inside an expression.
    pub fn is_expression(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Number(_)
                | NodeKind::StringLiteral(_)
                | NodeKind::Identifier(_)
                | NodeKind::Binary { .. }
                | NodeKind::FunctionCall { .. }
        )
    }
}

/// Renders nodes back to source text. Binary expressions are fully
/// parenthesised, so parsing the output rebuilds the same tree shape.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            // Overflowed literals still scan back as a number
            NodeKind::Number(value) if value.is_infinite() => f.write_str("1e999"),
            NodeKind::Number(value) => write!(f, "{}", value),
            NodeKind::StringLiteral(value) => write_quoted(f, value),
            NodeKind::Identifier(name) => f.write_str(name),
            NodeKind::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            NodeKind::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            NodeKind::Assignment { name, value } => write!(f, "{} = {};", name, value),
            NodeKind::VarDeclaration {
                var_type,
                name,
                initializer,
            } => match initializer {
                Some(init) => write!(f, "{} {} = {};", var_type, name, init),
                None => write!(f, "{} {};", var_type, name),
            },
            NodeKind::If {
                condition,
                then_body,
                else_body,
            } => {
                write!(f, "if ({}) ", condition)?;
                write_body(f, then_body)?;
                if !else_body.is_empty() {
                    f.write_str(" else ")?;
                    write_body(f, else_body)?;
                }
                Ok(())
            }
            NodeKind::While { condition, body } => {
                write!(f, "while ({}) ", condition)?;
                write_body(f, body)
            }
            NodeKind::Block(statements) => write_body(f, statements),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            other => write!(f, "{}", other)?,
        }
    }
    f.write_str("\"")
}

fn write_statement(f: &mut fmt::Formatter, node: &Node) -> fmt::Result {
    if node.is_expression() {
        write!(f, "{};", node)
    } else {
        write!(f, "{}", node)
    }
}

fn write_body(f: &mut fmt::Formatter, statements: &[Node]) -> fmt::Result {
    f.write_str("{")?;
    for stmt in statements {
        f.write_str(" ")?;
        write_statement(f, stmt)?;
    }
    f.write_str(" }")
}

/// Render a statement list as source text, one statement per line.
pub fn render_program(statements: &[Node]) -> String {
    struct Statement<'a>(&'a Node);

    impl fmt::Display for Statement<'_> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write_statement(f, self.0)
        }
    }

    statements
        .iter()
        .map(|stmt| Statement(stmt).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
