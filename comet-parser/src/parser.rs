//! Recursive descent parser with precedence climbing for expressions.

mod expr;
mod stmt;

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::{Lexer, Token, TokenKind};
use std::mem;
use tracing::instrument;

pub struct Parser<I: Iterator<Item = Token>> {
    /// The token being parsed.
    current_token: Token,
    /// Cached token for peeking.
    peek_token: Token,
    tokens: I,
    /// End of the last token read. `Eof` is placed here.
    end: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new<T: IntoIterator<IntoIter = I, Item = Token>>(tokens: T) -> Self {
        let mut parser = Self {
            current_token: Token::new(TokenKind::Eof, "", 0..0),
            peek_token: Token::new(TokenKind::Eof, "", 0..0),
            tokens: tokens.into_iter(),
            end: 0,
        };
        parser.current_token = parser.next_token();
        parser.peek_token = parser.next_token();
        parser
    }
}

impl<'a> Parser<Lexer<'a>> {
    /// Create a `Parser` reading tokens straight from `source`.
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source))
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parses the whole token stream.
    /// Stops at the first syntax error, no partial tree is returned.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Result<RootNode, SyntaxError> {
        let start = self.current_token.span.start;
        let mut statements = Vec::new();
        while self.current_token.kind != TokenKind::Eof {
            statements.push(self.parse_stmt()?);
        }
        Ok(RootNode {
            statements,
            span: start..self.end,
        })
    }
}

/// Parse utilities
impl<I: Iterator<Item = Token>> Parser<I> {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.end = token.span.end;
                token
            }
            None => Token::new(TokenKind::Eof, "", self.end..self.end),
        }
    }

    /// Advances by one token and returns the token that was current.
    fn next(&mut self) -> Token {
        let token = self.next_token();
        let peeked = mem::replace(&mut self.peek_token, token);
        mem::replace(&mut self.current_token, peeked)
    }

    /// Eats the current token if it is of kind `kind`.
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current_token.kind == kind {
            Some(self.next())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(&[kind])),
        }
    }

    /// Creates an unexpected token error at the current token.
    fn unexpected(&self, expected: &[TokenKind]) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            found: self.current_token.kind,
            expected: expected.to_vec(),
            span: self.current_token.span.clone(),
        }
    }

    fn parse_identifier(&mut self) -> Result<Identifier, SyntaxError> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Identifier {
            name: token.literal,
            span: token.span,
        })
    }
}
