use comet_parser::ast::{BinaryOp, PrefixOp};
use comet_source::{Diagnostic, Span};
use comet_value::ObjectKind;
use thiserror::Error;

/// Runtime error with source span information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("operator `{op}` cannot be applied to {operand}")]
    PrefixType {
        op: PrefixOp,
        operand: ObjectKind,
        span: Span,
    },
    #[error("operator `{op}` cannot be applied to {lhs} and {rhs}")]
    BinaryType {
        op: BinaryOp,
        lhs: ObjectKind,
        rhs: ObjectKind,
        span: Span,
    },
    #[error("division by zero")]
    DivisionByZero { span: Span },
    #[error("cannot find `{name}` in this scope")]
    UnboundIdentifier { name: String, span: Span },
    #[error("`{name}` is {kind}, not a function")]
    NotCallable {
        name: String,
        kind: ObjectKind,
        span: Span,
    },
    #[error("function `{name}` takes {expected} argument(s) but {found} were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },
    #[error("condition must be a boolean, found {found}")]
    NonBooleanCondition { found: ObjectKind, span: Span },
}

impl Diagnostic for RuntimeError {
    fn span(&self) -> Span {
        match self {
            RuntimeError::PrefixType { span, .. }
            | RuntimeError::BinaryType { span, .. }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::UnboundIdentifier { span, .. }
            | RuntimeError::NotCallable { span, .. }
            | RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::NonBooleanCondition { span, .. } => span.clone(),
        }
    }
}
