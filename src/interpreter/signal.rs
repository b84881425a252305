//! Non-local control flow produced by statements.

use super::value::Value;

/// How a statement ended when it did not simply fall through.
///
/// Signals are ordinary results, not errors: `Break` and `Continue` are
/// consumed by the nearest enclosing loop and `Return` by the function call
/// that started the body.
#[derive(Debug, Clone, PartialEq)]
pub enum RunSignal {
    /// Leave the current function with the given value
    Return(Value),
    /// Leave the innermost loop
    Break,
    /// Skip to the next condition check of the innermost loop
    Continue,
}
