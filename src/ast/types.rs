//! Type system definitions for the AST.
//!
//! This module defines the structural type algebra used by the parser for
//! declared types and by the checker for inferred types:
//!
//! - Basic types, identified by name (`int`, `float`, `bool`, `str`, `None`)
//! - Template types, a name applied to an ordered argument list (`list<int>`)
//!
//! Two types are equal when their shapes match. Strings and lists are
//! subscriptable.

use std::fmt::Display;

use crate::interpreter::value::Value;

pub const INT: &str = "int";
pub const FLOAT: &str = "float";
pub const BOOL: &str = "bool";
pub const STR: &str = "str";
pub const NULL: &str = "None";
pub const LIST: &str = "list";
pub const FUNCTION: &str = "function";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(String),
    Template(String, Vec<Type>),
}

impl Type {
    pub fn basic(name: &str) -> Type {
        Type::Basic(name.to_string())
    }

    pub fn int() -> Type {
        Type::basic(INT)
    }

    pub fn float() -> Type {
        Type::basic(FLOAT)
    }

    pub fn bool() -> Type {
        Type::basic(BOOL)
    }

    pub fn str() -> Type {
        Type::basic(STR)
    }

    pub fn null() -> Type {
        Type::basic(NULL)
    }

    pub fn list(element: Type) -> Type {
        Type::Template(LIST.to_string(), vec![element])
    }

    /// Signature type: the return type first, then each parameter type.
    pub fn function(return_type: Type, parameters: Vec<Type>) -> Type {
        let mut arguments = vec![return_type];
        arguments.extend(parameters);
        Type::Template(FUNCTION.to_string(), arguments)
    }

    pub fn name(&self) -> &str {
        match self {
            Type::Basic(name) | Type::Template(name, _) => name,
        }
    }

    pub fn is_basic(&self, name: &str) -> bool {
        matches!(self, Type::Basic(own) if own == name)
    }

    /// `int`, `float` or `bool`: the operands plain arithmetic accepts.
    pub fn is_numeric(&self) -> bool {
        self.is_basic(INT) || self.is_basic(FLOAT) || self.is_basic(BOOL)
    }

    pub fn is_subscriptable(&self) -> bool {
        match self {
            Type::Basic(name) => name == STR,
            Type::Template(name, _) => name == LIST,
        }
    }

    /// The element type of `list<T>`.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Template(name, arguments) if name == LIST => arguments.first(),
            _ => None,
        }
    }

    /// The value a declaration of this type would start from.
    pub fn default_value(&self) -> Value {
        match self {
            Type::Basic(name) => match name.as_str() {
                INT => Value::Int(0),
                FLOAT => Value::Float(0.0),
                BOOL => Value::Bool(false),
                STR => Value::Str(String::new()),
                _ => Value::Null,
            },
            Type::Template(name, _) if name == LIST => Value::list(vec![]),
            Type::Template(..) => Value::Null,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Basic(name) => write!(f, "{}", name),
            Type::Template(name, arguments) => {
                write!(f, "{}<", name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ">")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Type::int(), Type::basic("int"));
        assert_ne!(Type::int(), Type::float());
        assert_eq!(Type::list(Type::int()), Type::list(Type::int()));
        assert_ne!(Type::list(Type::int()), Type::list(Type::str()));
        assert_ne!(
            Type::Template("pair".to_string(), vec![Type::int(), Type::str()]),
            Type::Template("pair".to_string(), vec![Type::str(), Type::int()])
        );
        assert_ne!(
            Type::Template("pair".to_string(), vec![Type::int()]),
            Type::Template("pair".to_string(), vec![Type::int(), Type::int()])
        );
        // A basic type never equals a template of the same name.
        assert_ne!(Type::basic("list"), Type::Template("list".to_string(), vec![]));
    }

    #[test]
    fn test_subscriptable() {
        assert!(Type::str().is_subscriptable());
        assert!(Type::list(Type::float()).is_subscriptable());
        assert!(Type::list(Type::list(Type::int())).is_subscriptable());
        assert!(!Type::int().is_subscriptable());
        assert!(!Type::null().is_subscriptable());
        assert!(!Type::function(Type::int(), vec![]).is_subscriptable());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(Type::int().default_value(), Value::Int(0));
        assert_eq!(Type::float().default_value(), Value::Float(0.0));
        assert_eq!(Type::bool().default_value(), Value::Bool(false));
        assert_eq!(Type::str().default_value(), Value::Str(String::new()));
        assert_eq!(Type::list(Type::int()).default_value(), Value::list(vec![]));
        assert_eq!(Type::basic("Point").default_value(), Value::Null);
        assert_eq!(Type::function(Type::int(), vec![]).default_value(), Value::Null);
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::int().to_string(), "int");
        assert_eq!(Type::list(Type::list(Type::str())).to_string(), "list<list<str>>");
        assert_eq!(
            Type::function(Type::int(), vec![Type::int(), Type::bool()]).to_string(),
            "function<int, int, bool>"
        );
    }
}
