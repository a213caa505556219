//! Lexer, AST and parser for the Comet language.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod visitor;

use ast::RootNode;
use error::SyntaxError;
use parser::Parser;

/// Parses `source` into a [`RootNode`].
pub fn parse(source: &str) -> Result<RootNode, SyntaxError> {
    Parser::from_source(source).parse_program()
}
