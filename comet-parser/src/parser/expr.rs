use super::*;
use crate::lexer::PREFIX_BP;
use tracing::trace;

impl<I: Iterator<Item = Token>> Parser<I> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, SyntaxError> {
        // NOTE: prefix operators are handled here
        match self.current_token.kind {
            TokenKind::Number
            | TokenKind::True
            | TokenKind::False
            | TokenKind::String => self.parse_literal_expr(),
            TokenKind::Identifier => self.parse_identifier_or_call_expr(),
            TokenKind::OpenParen => self.parse_parenthesised_expr(),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expr(),
            _ => Err(self.unexpected(&[
                TokenKind::Number,
                TokenKind::True,
                TokenKind::False,
                TokenKind::String,
                TokenKind::Identifier,
                TokenKind::OpenParen,
                TokenKind::Bang,
                TokenKind::Minus,
            ])),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let kind = self.current_token.kind;
            let (l_bp, r_bp) = match kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }
            let op = match BinaryOp::from_token(kind) {
                Some(op) => op,
                None => break,
            };
            trace!(%op, l_bp, r_bp, "binary operator");

            // self.current_token is a valid binop
            self.next();

            let rhs = self.parse_expr_bp(r_bp)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(BinaryExpr {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }

    fn parse_prefix_expr(&mut self) -> Result<Expr, SyntaxError> {
        let op = match PrefixOp::from_token(self.current_token.kind) {
            Some(op) => op,
            None => return Err(self.unexpected(&[TokenKind::Bang, TokenKind::Minus])),
        };
        let op_token = self.next();
        let arg = self.parse_expr_bp(PREFIX_BP)?;
        Ok(Expr::Prefix(PrefixExpr {
            span: op_token.span.start..arg.span().end,
            op,
            arg: Box::new(arg),
        }))
    }

    /// Parses `( expr )`. The parentheses open a new sub-parse accepting any expression.
    fn parse_parenthesised_expr(&mut self) -> Result<Expr, SyntaxError> {
        let open = self.expect(TokenKind::OpenParen)?;
        let inner = self.parse_expr()?;
        let close = self.expect(TokenKind::CloseParen)?;
        Ok(Expr::Parenthesised(ParenthesisedExpr {
            inner: Box::new(inner),
            span: open.span.start..close.span.end,
        }))
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be a number, bool or string literal.
    fn parse_literal_expr(&mut self) -> Result<Expr, SyntaxError> {
        let kind = self.current_token.kind;
        match kind {
            TokenKind::Number => {
                let token = self.next();
                let value = token
                    .literal
                    .parse::<i64>()
                    .map_err(|_| SyntaxError::InvalidNumber {
                        literal: token.literal.clone(),
                        span: token.span.clone(),
                    })?;
                Ok(Expr::NumberLit(NumberLit {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.next();
                Ok(Expr::BoolLit(BoolLit {
                    value: kind == TokenKind::True,
                    span: token.span,
                }))
            }
            TokenKind::String => {
                let token = self.next();
                let value = token
                    .literal
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .map(str::to_string);
                let value = match value {
                    Some(value) => value,
                    None => {
                        return Err(SyntaxError::InvalidString {
                            literal: token.literal,
                            span: token.span,
                        })
                    }
                };
                Ok(Expr::StringLit(StringLit {
                    value,
                    span: token.span,
                }))
            }
            _ => Err(self.unexpected(&[
                TokenKind::Number,
                TokenKind::True,
                TokenKind::False,
                TokenKind::String,
            ])),
        }
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    /// An identifier directly followed by `(` starts a call.
    fn parse_identifier_or_call_expr(&mut self) -> Result<Expr, SyntaxError> {
        if self.peek_token.kind != TokenKind::OpenParen {
            return Ok(Expr::Identifier(self.parse_identifier()?));
        }

        let callee = self.parse_identifier()?;
        self.expect(TokenKind::OpenParen)?;

        let mut args = Vec::new();
        let close = match self.eat(TokenKind::CloseParen) {
            Some(close) => close,
            None => loop {
                args.push(self.parse_expr()?);

                if let Some(close) = self.eat(TokenKind::CloseParen) {
                    break close;
                } else if self.eat(TokenKind::Comma).is_none() {
                    return Err(self.unexpected(&[TokenKind::Comma, TokenKind::CloseParen]));
                }
            },
        };

        Ok(Expr::Call(CallExpr {
            span: callee.span.start..close.span.end,
            callee,
            args,
        }))
    }
}
