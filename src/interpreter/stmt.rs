use tracing::debug;

use crate::{
    ast::statements::{Block, IfStmt, Stmt, WhileStmt},
    errors::errors::Error,
    scope::RuntimeScope,
};

use super::{
    expr::{assign, eval_expr},
    signal::RunSignal,
    value::Value,
};

/// Runs the statements of `block` in `scope`, stopping at the first signal.
pub fn run_block(block: &Block, scope: &RuntimeScope) -> Result<Option<RunSignal>, Error> {
    for statement in block.iter() {
        if let Some(signal) = run_stmt(statement, scope)? {
            return Ok(Some(signal));
        }
    }

    Ok(None)
}

pub fn run_stmt(statement: &Stmt, scope: &RuntimeScope) -> Result<Option<RunSignal>, Error> {
    match statement {
        Stmt::Block(block) => run_block(block, &scope.child()),
        Stmt::NoOp => Ok(None),
        Stmt::Expression(expr) => {
            eval_expr(expr, scope)?;
            Ok(None)
        }
        Stmt::If(if_stmt) => run_if(if_stmt, scope),
        Stmt::While(while_stmt) => run_while(while_stmt, scope),
        Stmt::VarDecl(declarations) => {
            for declaration in declarations {
                let value = match &declaration.assigned_value {
                    Some(expr) => eval_expr(expr, scope)?,
                    None => Value::Null,
                };
                scope.define(&declaration.identifier, value);
            }
            Ok(None)
        }
        Stmt::Assign { target, value } => {
            let value = eval_expr(value, scope)?;
            assign(target, value, scope)?;
            Ok(None)
        }
        Stmt::Return(expr) => {
            let value = match expr {
                Some(expr) => eval_expr(expr, scope)?,
                None => Value::Null,
            };
            Ok(Some(RunSignal::Return(value)))
        }
        Stmt::Break => Ok(Some(RunSignal::Break)),
        Stmt::Continue => Ok(Some(RunSignal::Continue)),
    }
}

fn run_if(if_stmt: &IfStmt, scope: &RuntimeScope) -> Result<Option<RunSignal>, Error> {
    for (condition, body) in &if_stmt.cases {
        if eval_expr(condition, scope)?.is_truthy() {
            return run_block(body, &scope.child());
        }
    }

    run_block(&if_stmt.else_body, &scope.child())
}

fn run_while(while_stmt: &WhileStmt, scope: &RuntimeScope) -> Result<Option<RunSignal>, Error> {
    let mut iterations: u64 = 0;

    while eval_expr(&while_stmt.condition, scope)?.is_truthy() {
        iterations += 1;
        match run_block(&while_stmt.body, &scope.child())? {
            Some(RunSignal::Break) => break,
            Some(RunSignal::Continue) | None => continue,
            Some(signal @ RunSignal::Return(_)) => return Ok(Some(signal)),
        }
    }

    debug!(iterations, "loop finished");
    Ok(None)
}
