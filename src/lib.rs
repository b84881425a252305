#![allow(clippy::module_inception)]

use std::fmt::Display;

use tracing::debug;

use crate::{
    ast::{expressions::Expr, statements::Block, types::Type},
    errors::errors::{Error, ErrorTip},
    interpreter::{expr::eval_expr, signal::RunSignal, stmt::run_block, value::Value},
    lexer::lexer::Lexer,
    parser::{expr::parse_expr, lookups::BindingPower, parser::Parser},
    scope::{RuntimeScope, TypeScope},
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// A 1-based source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexes and parses a whole program.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse(source: &str) -> Result<Block, Error> {
    let block = parser::parser::parse(source)?;
    debug!(statements = block.body.len(), "parsing complete");
    Ok(block)
}

/// Parses a single expression that must span the whole source.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_expression(source: &str) -> Result<Expr, Error> {
    let mut parser = Parser::new(Lexer::new(source))?;
    let expr = parse_expr(&mut parser, BindingPower::Default)?;
    if parser.has_tokens() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}

/// Type checks `block` against `scope`, returning the type its top-level
/// `return`s yield.
pub fn check(block: &Block, scope: &TypeScope) -> Result<Option<Type>, Error> {
    type_checker::type_checker::type_check(block, scope)
}

/// Runs a checked program in `scope`. A signal that reaches the top level
/// is handed back to the caller.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(block: &Block, scope: &RuntimeScope) -> Result<Option<RunSignal>, Error> {
    let signal = run_block(block, scope)?;
    debug!(?signal, "run complete");
    Ok(signal)
}

/// Evaluates a single expression in `scope`.
pub fn evaluate(expr: &Expr, scope: &RuntimeScope) -> Result<Value, Error> {
    eval_expr(expr, scope)
}

/// Returns the 1-based `line` of `source`, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)? as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Renders `error` with the offending source line and a caret under its
/// column.
///
/// ```text
/// Error: UnrecognisedToken
///    |
/// 20 | let a = #;
///    | --------^
/// ```
pub fn render_error(source: &str, error: &Error) -> String {
    let mut rendered = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };

    let position = match error.get_position() {
        Some(position) => position,
        None => {
            rendered.push_str(&format!("  {}\n", error));
            return rendered;
        }
    };
    let line_text = get_line_at_position(source, position.line).unwrap_or_default();

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    rendered.push_str(&format!("{:>padding$}\n", "|"));
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    rendered
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches(|c: char| c == ' ' || c == '\t');
    (trimmed, string.len() - trimmed.len())
}
