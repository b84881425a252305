//! Static type checking module.
//!
//! This module checks a parsed program before it runs. It:
//!
//! - Infers the type of every expression from constants, declarations and operators
//! - Resolves variable references through a chain of type scopes
//! - Validates assignment targets and assignment types
//! - Collects the types produced by `return` and rejects conflicting ones
//!
//! Checking fails fast on the first error.

pub mod type_checker;
