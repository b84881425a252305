//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that consumes tokens from the lexer
//! and builds an Abstract Syntax Tree. It uses precedence climbing for
//! expressions and handles:
//!
//! - Statement parsing (declarations, assignments, control flow)
//! - Expression parsing (binary and prefix operators, indexing, literals)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
