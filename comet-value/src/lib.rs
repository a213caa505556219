//! Runtime values of the Comet language.

pub mod environment;
pub mod object;

pub use environment::{Env, Environment};
pub use object::{Bool, Function, Object, ObjectKind, FALSE, TRUE};
