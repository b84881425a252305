use crate::{
    ast::statements::{Block, IfStmt, Stmt, VarDecl, WhileStmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance()?;
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Assign {
            target: expr,
            value,
        });
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(expr))
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected());
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block::new(statements))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_noop_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::NoOp)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Let)?;

    let mut declarations = vec![];
    loop {
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().to_string(),
                expected: Some(String::from("identifier during variable declaration")),
            },
            parser.get_position(),
        );
        let identifier = parser
            .expect_error(TokenKind::Identifier, Some(error))?
            .name()
            .unwrap_or_default()
            .to_string();

        parser.expect(TokenKind::Colon)?;
        let explicit_type = parse_type(parser, BindingPower::Default)?;

        let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance()?;
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        declarations.push(VarDecl {
            identifier,
            explicit_type,
            assigned_value,
        });

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance()?;
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(declarations))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::If)?;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;
    let mut cases = vec![(condition, body)];
    let mut else_body = Block::default();

    while parser.current_token_kind() == TokenKind::Else {
        parser.advance()?;

        if parser.current_token_kind() == TokenKind::If {
            parser.advance()?;
            let condition = parse_expr(parser, BindingPower::Default)?;
            let body = parse_block(parser)?;
            cases.push((condition, body));
        } else {
            else_body = parse_block(parser)?;
            break;
        }
    }

    Ok(Stmt::If(IfStmt { cases, else_body }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::While)?;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt { condition, body }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Return)?;

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(value))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Break)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Break)
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Continue)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Continue)
}
