use super::*;
use std::rc::Rc;
use tracing::trace;

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parses a statement, including its optional `;` terminator.
    pub fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        trace!(token = %self.current_token.kind, "statement");
        let stmt = match self.current_token.kind {
            TokenKind::Var => Stmt::Declaration(self.parse_declaration_stmt()?),
            TokenKind::Func => Stmt::Function(self.parse_function_stmt()?),
            TokenKind::Return => Stmt::Return(self.parse_return_stmt()?),
            TokenKind::If => Stmt::If(self.parse_if_stmt()?),
            TokenKind::OpenBrace => Stmt::Block(self.parse_block_stmt()?),
            _ => {
                // expression statement
                let expr = self.parse_expr()?;
                Stmt::Expr(ExprStmt {
                    span: expr.span(),
                    expr,
                })
            }
        };
        self.eat(TokenKind::Semi);
        Ok(stmt)
    }

    pub fn parse_block_stmt(&mut self) -> Result<BlockStmt, SyntaxError> {
        let open = self.expect(TokenKind::OpenBrace)?;

        let mut statements = Vec::new();
        loop {
            if let Some(close) = self.eat(TokenKind::CloseBrace) {
                return Ok(BlockStmt {
                    statements,
                    span: open.span.start..close.span.end,
                });
            }
            if self.current_token.kind == TokenKind::Eof {
                return Err(self.unexpected(&[TokenKind::CloseBrace]));
            }
            statements.push(self.parse_stmt()?);
        }
    }

    fn parse_declaration_stmt(&mut self) -> Result<DeclarationStmt, SyntaxError> {
        let var = self.expect(TokenKind::Var)?;
        let ident = self.parse_identifier()?;
        self.expect(TokenKind::Equals)?;
        let initializer = self.parse_expr()?;
        Ok(DeclarationStmt {
            span: var.span.start..initializer.span().end,
            ident,
            initializer,
        })
    }

    fn parse_function_stmt(&mut self) -> Result<FunctionStmt, SyntaxError> {
        let func = self.expect(TokenKind::Func)?;
        let ident = self.parse_identifier()?;
        self.expect(TokenKind::OpenParen)?;

        let mut params = Vec::new();
        if self.eat(TokenKind::CloseParen).is_none() {
            loop {
                params.push(self.parse_identifier()?);

                if self.eat(TokenKind::CloseParen).is_some() {
                    break;
                } else if self.eat(TokenKind::Comma).is_none() {
                    return Err(self.unexpected(&[TokenKind::Comma, TokenKind::CloseParen]));
                }
            }
        }

        let body = self.parse_block_stmt()?;

        Ok(FunctionStmt {
            span: func.span.start..body.span.end,
            ident,
            params,
            body: Rc::new(body),
        })
    }

    fn parse_return_stmt(&mut self) -> Result<ReturnStmt, SyntaxError> {
        let ret = self.expect(TokenKind::Return)?;
        let expr = self.parse_expr()?;
        Ok(ReturnStmt {
            span: ret.span.start..expr.span().end,
            expr,
        })
    }

    /// Parses `if test then_branch [else else_branch]`.
    /// The `else` is optional, but once present its branch is required.
    fn parse_if_stmt(&mut self) -> Result<IfStmt, SyntaxError> {
        let if_token = self.expect(TokenKind::If)?;
        let test = self.parse_expr()?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = match self.eat(TokenKind::Else) {
            Some(_) => Some(Box::new(self.parse_stmt()?)),
            None => None,
        };

        let end = else_branch
            .as_ref()
            .map_or_else(|| then_branch.span().end, |stmt| stmt.span().end);
        Ok(IfStmt {
            test,
            then_branch,
            else_branch,
            span: if_token.span.start..end,
        })
    }
}
