//! Chained lexical environments shared by the checker and the evaluator.
//!
//! A [`Scope`] is a cheap handle onto a frame of bindings. Cloning the handle
//! shares the frame, so a function value can hold on to the scope it was
//! created in while the program keeps mutating it.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    interpreter::{function::Function, value::Value},
};

/// The checker's environment: variable types and function signatures.
pub type TypeScope = Scope<Type, Type>;

/// The evaluator's environment: variable values and callable functions.
pub type RuntimeScope = Scope<Value, Rc<Function>>;

#[derive(Debug)]
struct Frame<V, F> {
    variables: HashMap<String, V>,
    functions: HashMap<String, F>,
    parent: Option<Scope<V, F>>,
}

#[derive(Debug)]
pub struct Scope<V, F>(Rc<RefCell<Frame<V, F>>>);

impl<V, F> Clone for Scope<V, F> {
    fn clone(&self) -> Self {
        Scope(Rc::clone(&self.0))
    }
}

impl<V: Clone, F: Clone> Default for Scope<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, F: Clone> Scope<V, F> {
    /// A root scope with no parent.
    pub fn new() -> Self {
        Scope(Rc::new(RefCell::new(Frame {
            variables: HashMap::new(),
            functions: HashMap::new(),
            parent: None,
        })))
    }

    /// A fresh empty scope whose lookups fall back to `self`.
    pub fn child(&self) -> Self {
        Scope(Rc::new(RefCell::new(Frame {
            variables: HashMap::new(),
            functions: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    pub fn find(&self, name: &str) -> Result<V, Error> {
        let frame = self.0.borrow();
        match frame.variables.get(name) {
            Some(value) => Ok(value.clone()),
            None => match &frame.parent {
                Some(parent) => parent.find(name),
                None => Err(Error::unpositioned(ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                })),
            },
        }
    }

    pub fn find_func(&self, name: &str) -> Result<F, Error> {
        let frame = self.0.borrow();
        match frame.functions.get(name) {
            Some(function) => Ok(function.clone()),
            None => match &frame.parent {
                Some(parent) => parent.find_func(name),
                None => Err(Error::unpositioned(ErrorImpl::FunctionNotDeclared {
                    function: name.to_string(),
                })),
            },
        }
    }

    /// Overwrites the nearest existing binding of `name`.
    pub fn set(&self, name: &str, value: V) -> Result<(), Error> {
        let mut frame = self.0.borrow_mut();
        if let Some(slot) = frame.variables.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &frame.parent {
            Some(parent) => parent.set(name, value),
            None => Err(Error::unpositioned(ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            })),
        }
    }

    /// Binds `name` in this frame, shadowing any outer binding.
    pub fn define(&self, name: &str, value: V) {
        self.0
            .borrow_mut()
            .variables
            .insert(name.to_string(), value);
    }

    pub fn define_func(&self, name: &str, function: F) {
        self.0
            .borrow_mut()
            .functions
            .insert(name.to_string(), function);
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.0.borrow().variables.contains_key(name)
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.clone()
    }

    /// Whether both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::errors::ErrorKind;

    type TestScope = Scope<i64, &'static str>;

    #[test]
    fn test_find_walks_parents() {
        let root = TestScope::new();
        root.define("x", 1);
        let child = root.child().child();

        assert_eq!(child.find("x").unwrap(), 1);
    }

    #[test]
    fn test_missing_variable_is_name_error() {
        let scope = TestScope::new().child();
        let error = scope.find("missing").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Name);
        assert_eq!(
            error.get_internal_error(),
            &ErrorImpl::VariableNotDeclared {
                variable: "missing".to_string()
            }
        );
        assert!(error.get_position().is_none());
    }

    #[test]
    fn test_define_shadows_without_touching_parent() {
        let root = TestScope::new();
        root.define("x", 1);
        let child = root.child();
        child.define("x", 2);

        assert_eq!(child.find("x").unwrap(), 2);
        assert_eq!(root.find("x").unwrap(), 1);
        assert!(!root.child().contains_local("x"));
    }

    #[test]
    fn test_set_updates_nearest_binding() {
        let root = TestScope::new();
        root.define("x", 1);
        let middle = root.child();
        let leaf = middle.child();

        leaf.set("x", 5).unwrap();
        assert_eq!(root.find("x").unwrap(), 5);

        middle.define("x", 10);
        leaf.set("x", 11).unwrap();
        assert_eq!(middle.find("x").unwrap(), 11);
        assert_eq!(root.find("x").unwrap(), 5);
    }

    #[test]
    fn test_set_undeclared_fails() {
        let scope = TestScope::new();
        let error = scope.set("y", 1).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Name);
    }

    #[test]
    fn test_functions_live_in_their_own_namespace() {
        let root = TestScope::new();
        root.define_func("f", "body");
        root.define("f", 3);

        assert_eq!(root.child().find_func("f").unwrap(), "body");
        assert_eq!(root.find("f").unwrap(), 3);
        assert_eq!(
            root.find_func("g").unwrap_err().get_internal_error(),
            &ErrorImpl::FunctionNotDeclared {
                function: "g".to_string()
            }
        );
    }

    #[test]
    fn test_handles_share_frames() {
        let scope = TestScope::new();
        let alias = scope.clone();
        alias.define("z", 9);

        assert_eq!(scope.find("z").unwrap(), 9);
        assert!(scope.ptr_eq(&alias));
        assert!(scope.child().parent().unwrap().ptr_eq(&scope));
    }
}
