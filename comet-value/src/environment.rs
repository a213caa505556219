//! Name to value bindings with lexical scoping.

use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to an [`Environment`]. Function objects keep the one they were declared in.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Default)]
pub struct Environment {
    values: HashMap<String, Object>,
    /// Enclosing scope. `None` for the global scope.
    parent: Option<Env>,
}

impl Environment {
    /// Creates an empty global scope.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates an empty scope enclosed by `parent`.
    pub fn new_enclosed(parent: &Env) -> Env {
        Rc::new(RefCell::new(Self {
            values: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Looks `name` up in this scope, then in the enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.borrow().get(name),
        }
    }

    /// Binds `name` in this scope, shadowing any binding of an enclosing scope.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.values.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_parent() {
        let global = Environment::new();
        global.borrow_mut().set("a", Object::Integer(1));
        let local = Environment::new_enclosed(&global);
        local.borrow_mut().set("b", Object::Integer(2));

        assert_eq!(local.borrow().get("a"), Some(Object::Integer(1)));
        assert_eq!(local.borrow().get("b"), Some(Object::Integer(2)));
        assert_eq!(global.borrow().get("b"), None);
        assert_eq!(local.borrow().get("c"), None);
    }

    #[test]
    fn test_shadowing() {
        let global = Environment::new();
        global.borrow_mut().set("a", Object::Integer(1));
        let local = Environment::new_enclosed(&global);
        local.borrow_mut().set("a", Object::boolean(true));

        assert_eq!(local.borrow().get("a"), Some(Object::boolean(true)));
        assert_eq!(global.borrow().get("a"), Some(Object::Integer(1)));
        assert_eq!(
            Environment::new_enclosed(&global).borrow().get("a"),
            Some(Object::Integer(1))
        );
    }

    #[test]
    fn test_parent_updates_are_visible() {
        let global = Environment::new();
        let local = Environment::new_enclosed(&global);
        global.borrow_mut().set("late", Object::Integer(7));
        assert_eq!(local.borrow().get("late"), Some(Object::Integer(7)));
    }
}
