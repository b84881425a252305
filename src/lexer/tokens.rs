use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{ast::expressions::Literal, Position};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("let", TokenKind::Let);
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map
    };

    /// Identifiers that lex as literal constants rather than names.
    pub static ref LITERAL_LOOKUP: HashMap<&'static str, Literal> = {
        let mut map = HashMap::new();
        map.insert("True", Literal::Bool(true));
        map.insert("False", Literal::Bool(false));
        map.insert("None", Literal::Null);
        map
    };

    pub static ref ESCAPE_LOOKUP: HashMap<char, char> = {
        let mut map = HashMap::new();
        map.insert('r', '\r');
        map.insert('t', '\t');
        map.insert('a', '\x07');
        map.insert('f', '\x0c');
        map.insert('v', '\x0b');
        map.insert('b', '\x08');
        map.insert('n', '\n');
        map.insert('"', '"');
        map.insert('\'', '\'');
        map.insert('\\', '\\');
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Constant,

    // Arithmetic
    Plus,
    Dash,
    Star,
    Slash,
    Percent,

    // Comparison
    Equals,    // ==
    NotEquals, // !=
    Greater,
    Less,
    GreaterEquals,
    LessEquals,

    ShiftLeft,
    ShiftRight,

    And,
    Or,

    Ampersand,
    Pipe,
    Caret,

    Not,   // !
    Tilde, // ~

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Comma,
    Colon,
    Semicolon,
    Assignment, // =

    // Reserved
    If,
    Else,
    While,
    Let,
    Fn,
    Return,
    Break,
    Continue,
}

impl TokenKind {
    /// The source text of fixed-spelling tokens, used in diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Identifier => "identifier",
            TokenKind::Constant => "constant",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LessEquals => "<=",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Not => "!",
            TokenKind::Tilde => "~",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Assignment => "=",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Let => "let",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub line: u32,
    pub column: u32,
    pub kind: TokenKind,
    pub value: Option<Literal>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, Some(Literal::Str(name))) => write!(f, "{}", name),
            (_, Some(value)) => write!(f, "{}", value),
            (kind, None) => write!(f, "{}", kind),
        }
    }
}

impl Token {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The identifier name carried by an `Identifier` token.
    pub fn name(&self) -> Option<&str> {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, Some(Literal::Str(name))) => Some(name.as_str()),
            _ => None,
        }
    }
}
