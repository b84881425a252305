//! Closures built by embedders.
//!
//! The language has no syntax for declaring functions. A host program builds
//! a [`Function`] from a parsed body, a signature and the scope the body
//! should see, then stores it in a [`RuntimeScope`] or a variable.

use std::fmt;

use tracing::debug;

use crate::{
    ast::{statements::Block, types::Type},
    errors::errors::{runtime_fault, Error},
    scope::RuntimeScope,
};

use super::{signal::RunSignal, stmt::run_block, value::Value};

pub struct Function {
    pub param_names: Vec<String>,
    pub param_types: Vec<Type>,
    pub return_type: Type,
    pub body: Block,
    /// The defining scope. Every call runs in a fresh child of it.
    pub scope: RuntimeScope,
}

impl Function {
    pub fn new(
        params: Vec<(String, Type)>,
        return_type: Type,
        body: Block,
        scope: RuntimeScope,
    ) -> Function {
        let (param_names, param_types) = params.into_iter().unzip();
        Function {
            param_names,
            param_types,
            return_type,
            body,
            scope,
        }
    }

    /// `function<return, params...>`
    pub fn signature(&self) -> Type {
        Type::function(self.return_type.clone(), self.param_types.clone())
    }

    /// Binds `args` positionally in a child of the captured scope and runs
    /// the body. A body that finishes without `return` yields `None`.
    #[tracing::instrument(level = "debug", skip_all, fields(arity = args.len()))]
    pub fn call(&self, args: Vec<Value>) -> Result<Value, Error> {
        if args.len() != self.param_names.len() {
            return Err(runtime_fault(format!(
                "function takes {} argument(s) but {} were given",
                self.param_names.len(),
                args.len()
            )));
        }

        let scope = self.scope.child();
        for (name, arg) in self.param_names.iter().zip(args) {
            scope.define(name, arg);
        }

        let result = match run_block(&self.body, &scope)? {
            Some(RunSignal::Return(value)) => value,
            Some(signal) => {
                debug!(?signal, "loop signal escaped function body");
                Value::Null
            }
            None => Value::Null,
        };

        debug!(%result, "function returned");
        Ok(result)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("param_names", &self.param_names)
            .field("signature", &self.signature())
            .finish_non_exhaustive()
    }
}
