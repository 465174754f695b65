pub mod ast;
pub mod errors;
pub mod expressions;
pub mod source;
pub mod statements;

pub use ast::*;
pub use errors::*;
pub use expressions::Parser;
pub use source::*;
pub use statements::*;
