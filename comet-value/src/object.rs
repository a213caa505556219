use crate::environment::Env;
use comet_parser::ast::BlockStmt;
use std::fmt;
use std::ptr;
use std::rc::Rc;

/// A boolean runtime value. Only the two statics [`TRUE`] and [`FALSE`] exist.
#[derive(Debug)]
pub struct Bool(bool);

impl Bool {
    pub fn value(&self) -> bool {
        self.0
    }
}

pub static TRUE: Bool = Bool(true);
pub static FALSE: Bool = Bool(false);

/// A runtime value. Cloning is cheap, payloads are shared.
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    /// Always points to [`TRUE`] or [`FALSE`].
    Boolean(&'static Bool),
    String(Rc<str>),
    Null,
    Function(Rc<Function>),
}

impl Object {
    /// Returns the shared boolean for `value`.
    pub fn boolean(value: bool) -> Self {
        Object::Boolean(if value { &TRUE } else { &FALSE })
    }

    pub fn string(value: &str) -> Self {
        Object::String(value.into())
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::String(_) => ObjectKind::String,
            Object::Null => ObjectKind::Null,
            Object::Function(_) => ObjectKind::Function,
        }
    }

    pub fn cast_to_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(val) => Some(val.value()),
            _ => None,
        }
    }

    /// Equality as seen by the `==` operator.
    /// Objects of different kinds are never equal. Booleans and functions compare by identity.
    pub fn equals(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Integer(l), Object::Integer(r)) => l == r,
            (Object::Boolean(l), Object::Boolean(r)) => ptr::eq(*l, *r),
            (Object::String(l), Object::String(r)) => l == r,
            (Object::Null, Object::Null) => true,
            (Object::Function(l), Object::Function(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        self.equals(other)
    }
}

impl From<i64> for Object {
    fn from(val: i64) -> Self {
        Object::Integer(val)
    }
}

impl From<bool> for Object {
    fn from(val: bool) -> Self {
        Object::boolean(val)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(val) => write!(f, "{}", val),
            Object::Boolean(val) => write!(f, "{}", val.value()),
            Object::String(val) => write!(f, "{}", val),
            Object::Null => write!(f, "null"),
            Object::Function(func) => write!(f, "<func {}>", func.ident),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(val) => write!(f, "Integer({})", val),
            Object::Boolean(val) => write!(f, "Boolean({})", val.value()),
            Object::String(val) => write!(f, "String({:?})", val),
            Object::Null => write!(f, "Null"),
            Object::Function(func) => write!(f, "Function({}/{})", func.ident, func.params.len()),
        }
    }
}

/// The kind of an [`Object`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Integer,
    Boolean,
    String,
    Null,
    Function,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectKind::Integer => "integer",
            ObjectKind::Boolean => "boolean",
            ObjectKind::String => "string",
            ObjectKind::Null => "null",
            ObjectKind::Function => "function",
        })
    }
}

/// A user defined function together with the environment it was declared in.
pub struct Function {
    pub ident: String,
    pub params: Vec<String>,
    pub body: Rc<BlockStmt>,
    /// Captured declaring environment.
    pub env: Env,
}

impl Function {
    /// Number of arguments that the function accepts.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Environment;

    #[test]
    fn test_boolean_singletons() {
        let (a, b) = (Object::boolean(true), Object::from(true));
        match (&a, &b) {
            (Object::Boolean(a), Object::Boolean(b)) => {
                assert!(ptr::eq(*a, &TRUE));
                assert!(ptr::eq(*b, &TRUE));
            }
            _ => panic!("expected booleans"),
        }
        assert_eq!(a, b);
        assert_ne!(Object::boolean(true), Object::boolean(false));
    }

    #[test]
    fn test_cross_kind_equality() {
        assert_ne!(Object::Integer(1), Object::boolean(true));
        assert_ne!(Object::Integer(0), Object::boolean(false));
        assert_ne!(Object::Null, Object::Integer(0));
        assert_ne!(Object::string("1"), Object::Integer(1));
        assert_eq!(Object::string("a"), Object::string("a"));
        assert_eq!(Object::Null, Object::Null);
    }

    #[test]
    fn test_function_identity() {
        let new_fn = || {
            Rc::new(Function {
                ident: "f".to_string(),
                params: vec!["x".to_string()],
                body: Rc::new(BlockStmt {
                    statements: Vec::new(),
                    span: 0..2,
                }),
                env: Environment::new(),
            })
        };
        let f = new_fn();
        assert_eq!(f.arity(), 1);
        assert_eq!(Object::Function(Rc::clone(&f)), Object::Function(Rc::clone(&f)));
        assert_ne!(Object::Function(f), Object::Function(new_fn()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Object::Integer(-3).to_string(), "-3");
        assert_eq!(Object::boolean(false).to_string(), "false");
        assert_eq!(Object::string("hi").to_string(), "hi");
        assert_eq!(Object::Null.to_string(), "null");
        assert_eq!(format!("{:?}", Object::string("hi")), "String(\"hi\")");
        assert_eq!(ObjectKind::Boolean.to_string(), "boolean");
    }
}
