//! Tree-walking evaluation of checked programs.
//!
//! This module executes the AST directly against a chain of runtime scopes.
//! It handles:
//!
//! - Runtime values with shared, mutable lists
//! - Expression evaluation with host numeric semantics
//! - Statement execution and control-flow signals
//! - Closures constructed by embedders

pub mod expr;
pub mod function;
pub mod signal;
pub mod stmt;
pub mod value;

#[cfg(test)]
mod tests;
