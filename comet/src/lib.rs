use std::sync::Once;

use comet_eval::{Evaluator, RuntimeError};
use comet_parser::error::SyntaxError;
use comet_parser::printer::AstPrinter;
use comet_parser::visitor::VisitError;
use comet_source::{Diagnostic, Span};
use comet_value::Object;
use thiserror::Error;

/// Any error produced while running Comet source code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Visit(#[from] VisitError),
}

impl Diagnostic for Error {
    fn span(&self) -> Span {
        match self {
            Error::Syntax(err) => err.span(),
            Error::Runtime(err) => err.span(),
            // not tied to a node
            Error::Visit(_) => 0..0,
        }
    }
}

/// Parses and evaluates `source` with `evaluator`, keeping its bindings for the next call.
pub fn run(evaluator: &mut Evaluator, source: &str) -> Result<Object, Error> {
    let ast = comet_parser::parse(source)?;
    Ok(evaluator.eval_program(&ast)?)
}

/// Parses `source` and dumps its syntax tree as indented text.
pub fn print_ast(source: &str) -> Result<String, Error> {
    let ast = comet_parser::parse(source)?;
    Ok(AstPrinter::print(&ast)?)
}

/// Parses and evaluates `source` in a fresh global scope.
pub fn interpret(source: &str) -> Result<Object, Error> {
    run(&mut Evaluator::new(), source)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Safe to call multiple times.
/// Enable with `RUST_LOG=comet_parser=trace` or `RUST_LOG=comet_eval=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
