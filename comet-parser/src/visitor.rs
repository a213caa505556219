//! Visitor pattern for AST nodes.
//!
//! A consumer implements one `visit_*` method per node kind it handles and calls the matching
//! `walk_*` function to descend into children. Every `visit_*` method left at its default returns
//! [`VisitError::Unimplemented`] so that incomplete consumers fail instead of silently skipping
//! nodes.
//!
//! Children are always walked in this order:
//! * root and block: statements in source order,
//! * `if`: test, then branch, else branch,
//! * function: parameters in declared order, then body,
//! * binary: left, then right,
//! * call: arguments in call order.

use crate::ast::*;
use std::fmt;
use thiserror::Error;

/// Every concrete node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Block,
    Declaration,
    Return,
    If,
    Function,
    ExprStmt,
    NumberLit,
    BoolLit,
    StringLit,
    Identifier,
    Prefix,
    Binary,
    Parenthesised,
    Call,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisitError {
    #[error("visitor does not implement {kind} nodes")]
    Unimplemented { kind: NodeKind },
}

pub type VisitResult = Result<(), VisitError>;

fn not_implemented(kind: NodeKind) -> VisitResult {
    Err(VisitError::Unimplemented { kind })
}

pub trait Visitor<'ast>: Sized {
    /// Dispatches to the `visit_*` method of the statement's kind.
    fn visit_stmt(&mut self, stmt: &'ast Stmt) -> VisitResult {
        walk_stmt(self, stmt)
    }
    /// Dispatches to the `visit_*` method of the expression's kind.
    fn visit_expr(&mut self, expr: &'ast Expr) -> VisitResult {
        walk_expr(self, expr)
    }

    fn visit_root(&mut self, _root: &'ast RootNode) -> VisitResult {
        not_implemented(NodeKind::Root)
    }
    fn visit_block_stmt(&mut self, _stmt: &'ast BlockStmt) -> VisitResult {
        not_implemented(NodeKind::Block)
    }
    fn visit_declaration_stmt(&mut self, _stmt: &'ast DeclarationStmt) -> VisitResult {
        not_implemented(NodeKind::Declaration)
    }
    fn visit_return_stmt(&mut self, _stmt: &'ast ReturnStmt) -> VisitResult {
        not_implemented(NodeKind::Return)
    }
    fn visit_if_stmt(&mut self, _stmt: &'ast IfStmt) -> VisitResult {
        not_implemented(NodeKind::If)
    }
    fn visit_function_stmt(&mut self, _stmt: &'ast FunctionStmt) -> VisitResult {
        not_implemented(NodeKind::Function)
    }
    fn visit_expr_stmt(&mut self, _stmt: &'ast ExprStmt) -> VisitResult {
        not_implemented(NodeKind::ExprStmt)
    }

    fn visit_number_lit(&mut self, _expr: &'ast NumberLit) -> VisitResult {
        not_implemented(NodeKind::NumberLit)
    }
    fn visit_bool_lit(&mut self, _expr: &'ast BoolLit) -> VisitResult {
        not_implemented(NodeKind::BoolLit)
    }
    fn visit_string_lit(&mut self, _expr: &'ast StringLit) -> VisitResult {
        not_implemented(NodeKind::StringLit)
    }
    fn visit_identifier(&mut self, _expr: &'ast Identifier) -> VisitResult {
        not_implemented(NodeKind::Identifier)
    }
    fn visit_prefix_expr(&mut self, _expr: &'ast PrefixExpr) -> VisitResult {
        not_implemented(NodeKind::Prefix)
    }
    fn visit_binary_expr(&mut self, _expr: &'ast BinaryExpr) -> VisitResult {
        not_implemented(NodeKind::Binary)
    }
    fn visit_parenthesised_expr(&mut self, _expr: &'ast ParenthesisedExpr) -> VisitResult {
        not_implemented(NodeKind::Parenthesised)
    }
    fn visit_call_expr(&mut self, _expr: &'ast CallExpr) -> VisitResult {
        not_implemented(NodeKind::Call)
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) -> VisitResult {
    match stmt {
        Stmt::Block(stmt) => visitor.visit_block_stmt(stmt),
        Stmt::Declaration(stmt) => visitor.visit_declaration_stmt(stmt),
        Stmt::Return(stmt) => visitor.visit_return_stmt(stmt),
        Stmt::If(stmt) => visitor.visit_if_stmt(stmt),
        Stmt::Function(stmt) => visitor.visit_function_stmt(stmt),
        Stmt::Expr(stmt) => visitor.visit_expr_stmt(stmt),
    }
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) -> VisitResult {
    match expr {
        Expr::NumberLit(expr) => visitor.visit_number_lit(expr),
        Expr::BoolLit(expr) => visitor.visit_bool_lit(expr),
        Expr::StringLit(expr) => visitor.visit_string_lit(expr),
        Expr::Identifier(expr) => visitor.visit_identifier(expr),
        Expr::Prefix(expr) => visitor.visit_prefix_expr(expr),
        Expr::Binary(expr) => visitor.visit_binary_expr(expr),
        Expr::Parenthesised(expr) => visitor.visit_parenthesised_expr(expr),
        Expr::Call(expr) => visitor.visit_call_expr(expr),
    }
}

/// Iteratively visit all statements in a `&[Stmt]`.
fn walk_stmt_list<'ast>(visitor: &mut impl Visitor<'ast>, body: &'ast [Stmt]) -> VisitResult {
    for stmt in body {
        visitor.visit_stmt(stmt)?;
    }
    Ok(())
}

pub fn walk_root<'ast>(visitor: &mut impl Visitor<'ast>, root: &'ast RootNode) -> VisitResult {
    walk_stmt_list(visitor, &root.statements)
}

pub fn walk_block_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast BlockStmt) -> VisitResult {
    walk_stmt_list(visitor, &stmt.statements)
}

pub fn walk_declaration_stmt<'ast>(
    visitor: &mut impl Visitor<'ast>,
    stmt: &'ast DeclarationStmt,
) -> VisitResult {
    visitor.visit_expr(&stmt.initializer)
}

pub fn walk_return_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast ReturnStmt) -> VisitResult {
    visitor.visit_expr(&stmt.expr)
}

pub fn walk_if_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast IfStmt) -> VisitResult {
    visitor.visit_expr(&stmt.test)?;
    visitor.visit_stmt(&stmt.then_branch)?;
    if let Some(else_branch) = &stmt.else_branch {
        visitor.visit_stmt(else_branch)?;
    }
    Ok(())
}

pub fn walk_function_stmt<'ast>(
    visitor: &mut impl Visitor<'ast>,
    stmt: &'ast FunctionStmt,
) -> VisitResult {
    for param in &stmt.params {
        visitor.visit_identifier(param)?;
    }
    visitor.visit_block_stmt(&stmt.body)
}

pub fn walk_expr_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast ExprStmt) -> VisitResult {
    visitor.visit_expr(&stmt.expr)
}

pub fn walk_prefix_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast PrefixExpr) -> VisitResult {
    visitor.visit_expr(&expr.arg)
}

pub fn walk_binary_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast BinaryExpr) -> VisitResult {
    visitor.visit_expr(&expr.lhs)?;
    visitor.visit_expr(&expr.rhs)
}

pub fn walk_parenthesised_expr<'ast>(
    visitor: &mut impl Visitor<'ast>,
    expr: &'ast ParenthesisedExpr,
) -> VisitResult {
    visitor.visit_expr(&expr.inner)
}

pub fn walk_call_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast CallExpr) -> VisitResult {
    for arg in &expr.args {
        visitor.visit_expr(arg)?;
    }
    Ok(())
}
