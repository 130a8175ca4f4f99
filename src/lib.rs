pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod token;

pub use ast::{Comparator, Condition, ConditionValue, Statement, ValueShape};
pub use error::{ParseError, ParseResult};
pub use parser::Parser;
pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};

/// Parses one LOOK statement from `input`.
pub fn parse(input: &str) -> ParseResult<Statement> {
    Parser::new(input).parse()
}
