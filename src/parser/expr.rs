use crate::{
    ast::expressions::{BinaryOp, Expr, Literal, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

/// Folds binary operators over factors.
///
/// The folded expression is kept as its right spine, root first. An incoming
/// operator wraps the first spine node whose operator has strictly higher
/// priority; when none does it attaches to the rightmost factor. Operators of
/// equal priority therefore nest to the right: `10 - 2 - 3` is
/// `10 - (2 - 3)`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let mut spine: Vec<(Expr, BinaryOp, BindingPower)> = Vec::new();
    let mut right = parse_factor(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let operator_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if operator_bp <= bp {
            break;
        }

        let operator_token = parser.advance()?;
        let op = match BinaryOp::from_token(operator_token.kind) {
            Some(op) => op,
            None => return Err(unexpected_token(&operator_token)),
        };
        let factor = parse_factor(parser)?;

        match spine.iter().position(|(_, _, node_bp)| *node_bp > operator_bp) {
            Some(at) => {
                let node = collapse(spine.split_off(at), right);
                spine.push((node, op, operator_bp));
            }
            None => spine.push((right, op, operator_bp)),
        }
        right = factor;
    }

    Ok(collapse(spine, right))
}

fn collapse(spine: Vec<(Expr, BinaryOp, BindingPower)>, right: Expr) -> Expr {
    spine
        .into_iter()
        .rev()
        .fold(right, |right, (left, op, _)| Expr::binary(op, left, right))
}

/// An atom, grouping or prefixed factor followed by any index suffixes.
pub fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };
        left = led(parser, left, BindingPower::Index)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance()?;
    match (token.kind, &token.value) {
        (TokenKind::Constant, Some(literal)) => Ok(Expr::Constant(literal.clone())),
        (TokenKind::Identifier, Some(Literal::Str(name))) => Ok(Expr::Variable(name.clone())),
        _ => Err(unexpected_token(&token)),
    }
}

/// `+x`, `-x`, `!x`, `~x`. The operand is a whole factor, index suffixes
/// included, so `-a[0]` negates the element.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = match UnaryOp::from_token(operator_token.kind) {
        Some(op) => op,
        None => return Err(unexpected_token(&operator_token)),
    };

    let operand = parse_factor(parser)?;

    Ok(Expr::unary(op, operand))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::index(left, index))
}

fn unexpected_token(token: &Token) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: token.to_string(),
            expected: None,
        },
        token.position(),
    )
}
