use crate::lexer::TokenKind;
use comet_source::{Diagnostic, Span};
use std::fmt;
use thiserror::Error;

/// Represents a syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected {found}, expected {}", Expected(.expected))]
    UnexpectedToken {
        found: TokenKind,
        /// Token kinds that would have been accepted instead.
        expected: Vec<TokenKind>,
        span: Span,
    },
    #[error("number literal `{literal}` does not fit in a 64-bit integer")]
    InvalidNumber { literal: String, span: Span },
    #[error("string literal `{literal}` is not enclosed in double quotes")]
    InvalidString { literal: String, span: Span },
}

impl SyntaxError {
    /// Returns `true` if the error was caused by a missing `kind` token.
    pub fn expects(&self, kind: TokenKind) -> bool {
        match self {
            SyntaxError::UnexpectedToken { expected, .. } => expected.contains(&kind),
            SyntaxError::InvalidNumber { .. } | SyntaxError::InvalidString { .. } => false,
        }
    }
}

impl Diagnostic for SyntaxError {
    fn span(&self) -> Span {
        match self {
            SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::InvalidNumber { span, .. }
            | SyntaxError::InvalidString { span, .. } => span.clone(),
        }
    }
}

/// Formats a list of expected token kinds, e.g. "`)` or `,`".
struct Expected<'a>(&'a [TokenKind]);

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("nothing"),
            [only] => write!(f, "{}", only),
            [init @ .., last] => {
                for (i, kind) in init.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                write!(f, " or {}", last)
            }
        }
    }
}
