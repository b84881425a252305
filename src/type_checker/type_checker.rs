use tracing::debug;

use crate::{
    ast::{
        expressions::{BinaryOp, Expr, Literal, UnaryOp},
        statements::{Block, IfStmt, Stmt, WhileStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    interpreter::function::Function,
    scope::TypeScope,
};

pub fn type_check_expr(ast: &Expr, scope: &TypeScope) -> Result<Type, Error> {
    match ast {
        Expr::Constant(literal) => Ok(match literal {
            Literal::Int(_) => Type::int(),
            Literal::Float(_) => Type::float(),
            Literal::Bool(_) => Type::bool(),
            Literal::Str(_) => Type::str(),
            Literal::Null => Type::null(),
        }),
        Expr::Variable(name) => scope.find(name),
        Expr::Unary { op, operand } => {
            let operand = type_check_expr(operand, scope)?;
            unary_type(*op, &operand)
        }
        Expr::Binary { op, left, right } => {
            let left = type_check_expr(left, scope)?;
            let right = type_check_expr(right, scope)?;
            binary_type(*op, &left, &right)
        }
        Expr::Index { base, index } => {
            let base = type_check_expr(base, scope)?;
            let index = type_check_expr(index, scope)?;

            if index != Type::int() {
                return Err(Error::unpositioned(ErrorImpl::InvalidIndexType {
                    index: index.to_string(),
                }));
            }

            if base == Type::str() {
                Ok(Type::str())
            } else if base.is_subscriptable() {
                Ok(base.element_type().cloned().unwrap_or_else(Type::null))
            } else {
                Err(Error::unpositioned(ErrorImpl::NotSubscriptable {
                    type_: base.to_string(),
                }))
            }
        }
    }
}

fn unary_type(op: UnaryOp, operand: &Type) -> Result<Type, Error> {
    if op == UnaryOp::Not {
        return Ok(Type::bool());
    }

    if *operand == Type::int() || *operand == Type::bool() {
        Ok(Type::int())
    } else if *operand == Type::float() {
        Ok(Type::float())
    } else {
        Err(Error::unpositioned(ErrorImpl::UnsupportedUnary {
            operator: op.to_string(),
            operand: operand.to_string(),
        }))
    }
}

fn binary_type(op: BinaryOp, left: &Type, right: &Type) -> Result<Type, Error> {
    if matches!(op, BinaryOp::Eq | BinaryOp::Ne | BinaryOp::And | BinaryOp::Or) {
        return Ok(Type::bool());
    }

    if left.is_numeric() && right.is_numeric() {
        return Ok(if op.is_relational() {
            Type::bool()
        } else if *left == Type::float() || *right == Type::float() {
            Type::float()
        } else {
            Type::int()
        });
    }

    match op {
        BinaryOp::Add if left.is_subscriptable() && right.is_subscriptable() => Ok(left.clone()),
        BinaryOp::Mul if *left == Type::int() && right.is_subscriptable() => Ok(right.clone()),
        BinaryOp::Mul if left.is_subscriptable() && *right == Type::int() => Ok(left.clone()),
        _ => Err(Error::unpositioned(ErrorImpl::UnsupportedBinary {
            operator: op.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        })),
    }
}

/// Records `found` as a return type, failing if it differs from the first
/// one recorded.
fn merge_return_type(current: &mut Option<Type>, found: Option<Type>) -> Result<(), Error> {
    let found = match found {
        Some(found) => found,
        None => return Ok(()),
    };

    match current {
        None => *current = Some(found),
        Some(first) if *first != found => {
            return Err(Error::unpositioned(ErrorImpl::ConflictingReturnType {
                first: first.to_string(),
                second: found.to_string(),
            }))
        }
        Some(_) => {}
    }

    Ok(())
}

/// Checks one statement, returning the type its reachable `return`s yield.
pub fn type_check_stmt(ast: &Stmt, scope: &TypeScope) -> Result<Option<Type>, Error> {
    match ast {
        Stmt::Block(block) => type_check_block(block, &scope.child()),
        Stmt::NoOp | Stmt::Break | Stmt::Continue => Ok(None),
        Stmt::Expression(expr) => {
            type_check_expr(expr, scope)?;
            Ok(None)
        }
        Stmt::If(if_stmt) => type_check_if(if_stmt, scope),
        Stmt::While(while_stmt) => type_check_while(while_stmt, scope),
        Stmt::VarDecl(declarations) => {
            // Initializers are left to the evaluator; only the declared type is bound.
            for declaration in declarations {
                scope.define(&declaration.identifier, declaration.explicit_type.clone());
            }
            Ok(None)
        }
        Stmt::Assign { target, value } => {
            if !target.is_lvalue() {
                return Err(Error::unpositioned(ErrorImpl::NotAnLValue));
            }

            let left = type_check_expr(target, scope)?;
            let right = type_check_expr(value, scope)?;
            if left != right {
                return Err(Error::unpositioned(ErrorImpl::AssignmentTypeMismatch {
                    left: left.to_string(),
                    right: right.to_string(),
                }));
            }
            Ok(None)
        }
        Stmt::Return(value) => match value {
            Some(value) => Ok(Some(type_check_expr(value, scope)?)),
            None => Ok(Some(Type::null())),
        },
    }
}

fn type_check_if(if_stmt: &IfStmt, scope: &TypeScope) -> Result<Option<Type>, Error> {
    let mut return_type = None;

    for (condition, body) in &if_stmt.cases {
        type_check_expr(condition, scope)?;
        merge_return_type(&mut return_type, type_check_block(body, &scope.child())?)?;
    }
    merge_return_type(
        &mut return_type,
        type_check_block(&if_stmt.else_body, &scope.child())?,
    )?;

    Ok(return_type)
}

fn type_check_while(while_stmt: &WhileStmt, scope: &TypeScope) -> Result<Option<Type>, Error> {
    type_check_expr(&while_stmt.condition, scope)?;
    type_check_block(&while_stmt.body, &scope.child())
}

/// Checks the statements of `ast` in order in `scope`.
pub fn type_check_block(ast: &Block, scope: &TypeScope) -> Result<Option<Type>, Error> {
    let mut return_type = None;

    for stmt in ast.iter() {
        merge_return_type(&mut return_type, type_check_stmt(stmt, scope)?)?;
    }

    Ok(return_type)
}

/// Checks a whole program against `scope`, which embedders may pre-seed
/// with the types of the values they provide.
#[tracing::instrument(level = "debug", skip_all, fields(statements = ast.body.len()))]
pub fn type_check(ast: &Block, scope: &TypeScope) -> Result<Option<Type>, Error> {
    let return_type = type_check_block(ast, scope)?;
    debug!("type checking complete");
    Ok(return_type)
}

/// Checks an embedder-built function body against its declared signature.
///
/// Parameters are declared in a child of `scope`. A body without any
/// `return` is accepted whatever the declared return type.
pub fn type_check_function(function: &Function, scope: &TypeScope) -> Result<(), Error> {
    let scope = scope.child();
    for (name, param_type) in function.param_names.iter().zip(&function.param_types) {
        scope.define(name, param_type.clone());
    }

    match type_check_block(&function.body, &scope)? {
        Some(received) if received != function.return_type => {
            Err(Error::unpositioned(ErrorImpl::ReturnTypeMismatch {
                expected: function.return_type.to_string(),
                received: received.to_string(),
            }))
        }
        _ => Ok(()),
    }
}
