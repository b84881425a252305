//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, identifiers and literal keywords
//! - Numeric literals (integers and floats)
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments
//! - Line and column tracking
//! - Error cases

use pretty_assertions::assert_eq;

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};
use crate::{
    ast::expressions::Literal,
    errors::errors::{ErrorImpl, ErrorKind},
    Position,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn constant(source: &str) -> Literal {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Constant);
    tokens[0].value.clone().unwrap()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("if else while let fn return break continue"),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Let,
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_1 x2 ifx éte").unwrap();

    let names: Vec<_> = tokens.iter().filter_map(|token| token.name()).collect();
    assert_eq!(names, vec!["foo", "bar_1", "x2", "ifx", "éte"]);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_literal_keywords() {
    assert_eq!(constant("True"), Literal::Bool(true));
    assert_eq!(constant("False"), Literal::Bool(false));
    assert_eq!(constant("None"), Literal::Null);
    // Only the exact spelling is a constant.
    assert_eq!(kinds("true")[0], TokenKind::Identifier);
}

#[test]
fn test_tokenize_numbers() {
    assert_eq!(constant("42"), Literal::Int(42));
    assert_eq!(constant("0"), Literal::Int(0));
    assert_eq!(constant("3.14"), Literal::Float(3.14));
    assert_eq!(constant("1."), Literal::Float(1.0));
}

#[test]
fn test_number_with_two_dots() {
    let error = tokenize("1.2.3").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NumberParseError {
            token: "1.2.3".to_string()
        }
    );
}

#[test]
fn test_integer_overflow_is_syntax_error() {
    let error = tokenize("99999999999999999999").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_tokenize_strings() {
    assert_eq!(constant("\"hello\""), Literal::Str("hello".to_string()));
    assert_eq!(constant("\"\""), Literal::Str(String::new()));
    assert_eq!(
        constant(r#""a\tb\n\"q\" \\ \'""#),
        Literal::Str("a\tb\n\"q\" \\ '".to_string())
    );
    assert_eq!(
        constant(r#""\r\a\f\v\b""#),
        Literal::Str("\r\x07\x0c\x0b\x08".to_string())
    );
}

#[test]
fn test_octal_escape() {
    assert_eq!(constant(r#""\101\102""#), Literal::Str("AB".to_string()));
    assert_eq!(constant(r#""\0""#), Literal::Str("\0".to_string()));
}

#[test]
fn test_unknown_escape() {
    let error = tokenize(r#""\q""#).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnknownEscape {
            escape: "q".to_string()
        }
    );
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let error = tokenize("let s: str = \"abc").unwrap_err();

    assert_eq!(error.get_internal_error(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position(), Some(&Position::new(1, 14)));
}

#[test]
fn test_comments_are_skipped() {
    let source = "// leading comment\n1 /* block\n comment */ + 2 // trailing";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Constant,
            TokenKind::Plus,
            TokenKind::Constant,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize("1 /* never closed").unwrap_err();

    assert_eq!(error.get_internal_error(), &ErrorImpl::UnterminatedComment);
    assert_eq!(error.get_position(), Some(&Position::new(1, 3)));
}

#[test]
fn test_operators_longest_match() {
    assert_eq!(
        kinds("== != >= <= << >> && || = > < & | + - * / % ^ ! ~"),
        vec![
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::GreaterEquals,
            TokenKind::LessEquals,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Assignment,
            TokenKind::Greater,
            TokenKind::Less,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Not,
            TokenKind::Tilde,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("a<=b"),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        kinds("()[]{},:;"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_line_and_column_tracking() {
    let tokens = tokenize("let x: int;\n  x = 10;\n\tx").unwrap();

    let positions: Vec<_> = tokens
        .iter()
        .map(|token| (token.kind, token.line, token.column))
        .collect();
    assert_eq!(
        positions,
        vec![
            (TokenKind::Let, 1, 1),
            (TokenKind::Identifier, 1, 5),
            (TokenKind::Colon, 1, 6),
            (TokenKind::Identifier, 1, 8),
            (TokenKind::Semicolon, 1, 11),
            (TokenKind::Identifier, 2, 3),
            (TokenKind::Assignment, 2, 5),
            (TokenKind::Constant, 2, 7),
            (TokenKind::Semicolon, 2, 9),
            (TokenKind::Identifier, 3, 2),
            (TokenKind::EOF, 3, 3),
        ]
    );
}

#[test]
fn test_newline_inside_string_advances_line() {
    let tokens = tokenize("\"a\nb\" x").unwrap();

    assert_eq!(tokens[0].value, Some(Literal::Str("a\nb".to_string())));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 4));
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("let a = #;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnrecognisedToken {
            token: "#".to_string()
        }
    );
    assert_eq!(error.get_position(), Some(&Position::new(1, 9)));
}

#[test]
fn test_pull_based_scanning() {
    let mut lexer = Lexer::new("a + 1");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Plus);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Constant);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    // EOF repeats once the input is exhausted.
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}
