//! Tree-walking evaluator for the Comet language.

pub mod error;
pub mod evaluator;

pub use error::RuntimeError;
pub use evaluator::{Evaluator, Flow};
