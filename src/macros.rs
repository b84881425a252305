//! Utility macros for the engine.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-spelling tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's optional literal payload
/// * `$line` - 1-based line of the token's first character
/// * `$column` - 1-based column of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Constant, Some(Literal::Int(42)), 1, 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $column:expr) => {
        $crate::lexer::tokens::Token {
            line: $line,
            column: $column,
            kind: $kind,
            value: $value,
        }
    };
}

/// Creates a default lexer handler for fixed-spelling tokens.
///
/// Generates a handler function that creates a token with the given kind at
/// the lexer's current position and advances the lexer past the token.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal spelling (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer,
         _matched: &str|
         -> Result<$crate::lexer::tokens::Token, $crate::errors::errors::Error> {
            let token = $crate::MK_TOKEN!($kind, None, lexer.line(), lexer.column());
            lexer.advance_n($value.len());
            Ok(token)
        }
    };
}
