//! Abstract syntax tree.
//!
//! Every node owns its children and records the [`Span`] of source it was parsed from.

use crate::lexer::TokenKind;
use comet_source::Span;
use std::fmt;
use std::rc::Rc;

/// The result of parsing a whole program.
#[derive(Debug, Clone, PartialEq)]
pub struct RootNode {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Declaration(DeclarationStmt),
    Return(ReturnStmt),
    If(IfStmt),
    Function(FunctionStmt),
    /// An expression in statement position (e.g. `foo(1);`).
    Expr(ExprStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(stmt) => stmt.span.clone(),
            Stmt::Declaration(stmt) => stmt.span.clone(),
            Stmt::Return(stmt) => stmt.span.clone(),
            Stmt::If(stmt) => stmt.span.clone(),
            Stmt::Function(stmt) => stmt.span.clone(),
            Stmt::Expr(stmt) => stmt.span.clone(),
        }
    }
}

/// `{ ... }`. Does not introduce a new scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// `var ident = initializer`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStmt {
    pub ident: Identifier,
    pub initializer: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expr: Expr,
    pub span: Span,
}

/// `if test then [else else_branch]`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub span: Span,
}

/// `func ident(params...) { body }`
///
/// The body is shared with every function object created from this statement.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub ident: Identifier,
    pub params: Vec<Identifier>,
    pub body: Rc<BlockStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(NumberLit),
    BoolLit(BoolLit),
    StringLit(StringLit),
    /// An identifier (e.g. `foo`).
    Identifier(Identifier),
    /// A prefix expression (e.g. `-1`, `!x`).
    Prefix(PrefixExpr),
    /// A binary expression (e.g. `1+1`).
    Binary(BinaryExpr),
    /// `(inner)`. Only kept to preserve grouping, evaluates like `inner`.
    Parenthesised(ParenthesisedExpr),
    /// A call expression (e.g. `foo(1, 2)`).
    Call(CallExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::NumberLit(expr) => expr.span.clone(),
            Expr::BoolLit(expr) => expr.span.clone(),
            Expr::StringLit(expr) => expr.span.clone(),
            Expr::Identifier(expr) => expr.span.clone(),
            Expr::Prefix(expr) => expr.span.clone(),
            Expr::Binary(expr) => expr.span.clone(),
            Expr::Parenthesised(expr) => expr.span.clone(),
            Expr::Call(expr) => expr.span.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    /// The string contents, without the quotes.
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub op: PrefixOp,
    pub arg: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesisedExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Identifier,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(PrefixOp::Not),
            TokenKind::Minus => Some(PrefixOp::Neg),
            _ => None,
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOp::Not => "!",
            PrefixOp::Neg => "-",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Asterisk => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::EqualsEquals => BinaryOp::Eq,
            TokenKind::NotEquals => BinaryOp::NotEq,
            TokenKind::LessThan => BinaryOp::Less,
            TokenKind::LessThanEquals => BinaryOp::LessEq,
            TokenKind::GreaterThan => BinaryOp::Greater,
            TokenKind::GreaterThanEquals => BinaryOp::GreaterEq,
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        })
    }
}
