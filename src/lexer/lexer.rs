use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    ast::expressions::Literal,
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, ESCAPE_LOOKUP, LITERAL_LOOKUP, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<Token, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^[ \t\n]+").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"^//[^\n]*").unwrap();

    // Order matters: multi-character operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}\p{N}_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^[0-9][0-9.]*").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
        RegexPattern { regex: Regex::new(r"^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new(r"^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new(r"^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
    ];
}

/// Pull-based scanner: every call to [`Lexer::next_token`] consumes the
/// characters of exactly one token.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            source: source.to_string(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Advances by `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn advance(&mut self) {
        if let Some(ch) = self.at() {
            self.advance_n(ch.len_utf8());
        }
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            if let Some(found) = WHITESPACE.find(self.remainder()) {
                let end = found.end();
                self.advance_n(end);
            } else if let Some(found) = LINE_COMMENT.find(self.remainder()) {
                let end = found.end();
                self.advance_n(end);
            } else if self.remainder().starts_with("/*") {
                let start = self.position();
                match self.remainder()[2..].find("*/") {
                    Some(end) => self.advance_n(end + 4),
                    None => return Err(Error::new(ErrorImpl::UnterminatedComment, start)),
                }
            } else {
                return Ok(());
            }
        }
    }

    /// Scans the next token. At end of input an `EOF` token is returned.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_trivia()?;

        if self.at_eof() {
            return Ok(MK_TOKEN!(TokenKind::EOF, None, self.line, self.column));
        }

        for pattern in PATTERNS.iter() {
            let matched = match pattern.regex.find(self.remainder()) {
                Some(found) => found.as_str().to_string(),
                None => continue,
            };

            let token = (pattern.handler)(self, &matched)?;
            trace!(kind = %token.kind, line = token.line, column = token.column, "token");
            return Ok(token);
        }

        let token = self.at().map(String::from).unwrap_or_default();
        Err(Error::new(ErrorImpl::UnrecognisedToken { token }, self.position()))
    }
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<Token, Error> {
    let (line, column) = (lexer.line, lexer.column);
    lexer.advance_n(matched.len());

    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        Ok(MK_TOKEN!(*kind, None, line, column))
    } else if let Some(literal) = LITERAL_LOOKUP.get(matched) {
        Ok(MK_TOKEN!(TokenKind::Constant, Some(literal.clone()), line, column))
    } else {
        Ok(MK_TOKEN!(
            TokenKind::Identifier,
            Some(Literal::Str(matched.to_string())),
            line,
            column
        ))
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<Token, Error> {
    let start = lexer.position();
    lexer.advance_n(matched.len());

    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: matched.to_string(),
            },
            start.clone(),
        )
    };

    let value = match matched.matches('.').count() {
        0 => Literal::Int(matched.parse().map_err(|_| number_error())?),
        1 => Literal::Float(matched.parse().map_err(|_| number_error())?),
        _ => return Err(number_error()),
    };

    Ok(MK_TOKEN!(TokenKind::Constant, Some(value), start.line, start.column))
}

fn string_handler(lexer: &mut Lexer, _matched: &str) -> Result<Token, Error> {
    let start = lexer.position();
    lexer.advance();

    let mut result = String::new();
    loop {
        match lexer.at() {
            None => return Err(Error::new(ErrorImpl::UnterminatedString, start)),
            Some('"') => {
                lexer.advance();
                break;
            }
            Some('\\') => {
                lexer.advance();
                result.push(escape(lexer, &start)?);
            }
            Some(ch) => {
                result.push(ch);
                lexer.advance();
            }
        }
    }

    Ok(MK_TOKEN!(
        TokenKind::Constant,
        Some(Literal::Str(result)),
        start.line,
        start.column
    ))
}

/// Decodes the escape sequence after a backslash.
fn escape(lexer: &mut Lexer, string_start: &Position) -> Result<char, Error> {
    let position = lexer.position();
    let ch = match lexer.at() {
        Some(ch) => ch,
        None => return Err(Error::new(ErrorImpl::UnterminatedString, string_start.clone())),
    };

    if let Some(escaped) = ESCAPE_LOOKUP.get(&ch) {
        lexer.advance();
        return Ok(*escaped);
    }

    if ch.is_digit(8) {
        let mut digits = String::new();
        while let Some(digit) = lexer.at().filter(|c| c.is_digit(8)) {
            digits.push(digit);
            lexer.advance();
        }

        return u32::from_str_radix(&digits, 8)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| Error::new(ErrorImpl::UnknownEscape { escape: digits }, position));
    }

    Err(Error::new(
        ErrorImpl::UnknownEscape {
            escape: ch.to_string(),
        },
        position,
    ))
}

/// Scans the whole source, returning every token up to and including `EOF`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
