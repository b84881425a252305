use std::{cmp::Ordering, mem};

use crate::{
    ast::expressions::{BinaryOp, Expr, UnaryOp},
    errors::errors::{runtime_fault, Error},
    scope::RuntimeScope,
};

use super::value::Value;

pub fn eval_expr(expr: &Expr, scope: &RuntimeScope) -> Result<Value, Error> {
    match expr {
        Expr::Constant(literal) => Ok(Value::from(literal)),
        Expr::Variable(name) => scope.find(name),
        Expr::Unary { op, operand } => {
            let operand = eval_expr(operand, scope)?;
            eval_unary(*op, operand)
        }
        Expr::Binary { op, left, right } => match op {
            BinaryOp::And => {
                let left = eval_expr(left, scope)?;
                if !left.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(eval_expr(right, scope)?.is_truthy()))
            }
            BinaryOp::Or => {
                let left = eval_expr(left, scope)?;
                if left.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(eval_expr(right, scope)?.is_truthy()))
            }
            _ => {
                let left = eval_expr(left, scope)?;
                let right = eval_expr(right, scope)?;
                eval_binary(*op, left, right)
            }
        },
        Expr::Index { base, index } => {
            let base = eval_expr(base, scope)?;
            let index = eval_expr(index, scope)?;
            eval_index(&base, &index)
        }
    }
}

/// Stores `value` into the place `target` names.
///
/// The right side has already been evaluated by the caller.
pub fn assign(target: &Expr, value: Value, scope: &RuntimeScope) -> Result<(), Error> {
    match target {
        Expr::Variable(name) => scope.set(name, value),
        Expr::Index { base, index } => {
            let base = eval_expr(base, scope)?;
            let index = eval_expr(index, scope)?;
            match base {
                Value::List(items) => {
                    let mut items = items.borrow_mut();
                    let position = resolve_index(&index, items.len())?;
                    items[position] = value;
                    Ok(())
                }
                Value::Str(_) => Err(runtime_fault("'str' does not support item assignment")),
                other => Err(runtime_fault(format!(
                    "'{}' does not support item assignment",
                    other.kind_name()
                ))),
            }
        }
        _ => Err(runtime_fault("cannot assign to expression")),
    }
}

fn eval_unary(op: UnaryOp, operand: Value) -> Result<Value, Error> {
    match (op, &operand) {
        (UnaryOp::Not, _) => Ok(Value::Bool(!operand.is_truthy())),
        (UnaryOp::Plus | UnaryOp::Minus, Value::Float(n)) => Ok(Value::Float(match op {
            UnaryOp::Minus => -n,
            _ => *n,
        })),
        (UnaryOp::Plus, _) => operand
            .as_int()
            .map(Value::Int)
            .ok_or_else(|| bad_unary(op, &operand)),
        (UnaryOp::Minus, _) => match operand.as_int() {
            Some(n) => n.checked_neg().map(Value::Int).ok_or_else(overflow),
            None => Err(bad_unary(op, &operand)),
        },
        (UnaryOp::Invert, _) => operand
            .as_int()
            .map(|n| Value::Int(!n))
            .ok_or_else(|| bad_unary(op, &operand)),
    }
}

fn eval_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, Error> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Ge | BinaryOp::Le => {
            let ordering = compare(&left, &right).ok_or_else(|| bad_binary(op, &left, &right))?;
            Ok(Value::Bool(match (op, ordering) {
                (_, None) => false,
                (BinaryOp::Gt, Some(ordering)) => ordering == Ordering::Greater,
                (BinaryOp::Lt, Some(ordering)) => ordering == Ordering::Less,
                (BinaryOp::Ge, Some(ordering)) => ordering != Ordering::Less,
                (_, Some(ordering)) => ordering != Ordering::Greater,
            }))
        }
        BinaryOp::Add => match (&left, &right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (Value::List(a), Value::List(b)) => {
                let mut items = a.borrow().clone();
                items.extend(b.borrow().iter().cloned());
                Ok(Value::list(items))
            }
            _ => arithmetic(op, &left, &right),
        },
        BinaryOp::Mul => {
            if let (Value::Str(_) | Value::List(_), Some(count)) = (&left, right.as_int()) {
                return repeat(&left, count);
            }
            if let (Some(count), Value::Str(_) | Value::List(_)) = (left.as_int(), &right) {
                return repeat(&right, count);
            }
            arithmetic(op, &left, &right)
        }
        BinaryOp::Sub | BinaryOp::Div | BinaryOp::Mod => arithmetic(op, &left, &right),
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            match (left.as_int(), right.as_int()) {
                (Some(a), Some(b)) => bitwise(op, a, b),
                _ => Err(bad_binary(op, &left, &right)),
            }
        }
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// `None` when the operands cannot be ordered at all; `Some(None)` when they
/// are numbers but unordered (NaN).
fn compare(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(Some(a.cmp(b))),
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Some(left.as_float()?.partial_cmp(&right.as_float()?))
        }
        _ => Some(Some(left.as_int()?.cmp(&right.as_int()?))),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, Error> {
    let float_operands = matches!(left, Value::Float(_)) || matches!(right, Value::Float(_));

    if op == BinaryOp::Div || float_operands {
        let (a, b) = match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(bad_binary(op, left, right)),
        };
        if matches!(op, BinaryOp::Div | BinaryOp::Mod) && b == 0.0 {
            return Err(runtime_fault("division by zero"));
        }
        return Ok(Value::Float(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            _ => a % b,
        }));
    }

    let (a, b) = match (left.as_int(), right.as_int()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(bad_binary(op, left, right)),
    };
    if op == BinaryOp::Mod && b == 0 {
        return Err(runtime_fault("division by zero"));
    }
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        _ => a.checked_rem(b),
    };
    result.map(Value::Int).ok_or_else(overflow)
}

fn bitwise(op: BinaryOp, a: i64, b: i64) -> Result<Value, Error> {
    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl | BinaryOp::Shr if b < 0 => return Err(runtime_fault("negative shift count")),
        BinaryOp::Shl if a == 0 => 0,
        BinaryOp::Shl => {
            if b >= 64 || (a << b) >> b != a {
                return Err(overflow());
            }
            a << b
        }
        _ if b >= 64 => {
            if a < 0 {
                -1
            } else {
                0
            }
        }
        _ => a >> b,
    };
    Ok(Value::Int(result))
}

fn repeat(sequence: &Value, count: i64) -> Result<Value, Error> {
    let count = usize::try_from(count).unwrap_or(0);
    match sequence {
        Value::Str(s) => {
            repeated_len(s.len(), count, 1)?;
            Ok(Value::Str(s.repeat(count)))
        }
        Value::List(items) => {
            let items = items.borrow();
            let mut repeated = Vec::with_capacity(repeated_len(
                items.len(),
                count,
                mem::size_of::<Value>(),
            )?);
            if !items.is_empty() {
                for _ in 0..count {
                    repeated.extend(items.iter().cloned());
                }
            }
            Ok(Value::list(repeated))
        }
        other => Err(runtime_fault(format!("cannot repeat '{}'", other.kind_name()))),
    }
}

/// Length of `len` items repeated `count` times, if it can be allocated.
fn repeated_len(len: usize, count: usize, item_size: usize) -> Result<usize, Error> {
    len.checked_mul(count)
        .filter(|total| {
            total
                .checked_mul(item_size)
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| runtime_fault("repeated sequence is too long"))
}

fn eval_index(base: &Value, index: &Value) -> Result<Value, Error> {
    match base {
        Value::List(items) => {
            let items = items.borrow();
            let position = resolve_index(index, items.len())?;
            Ok(items[position].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let position = resolve_index(index, chars.len())?;
            Ok(Value::Str(chars[position].to_string()))
        }
        other => Err(runtime_fault(format!(
            "'{}' is not subscriptable",
            other.kind_name()
        ))),
    }
}

/// Maps a possibly negative index onto `0..len`.
fn resolve_index(index: &Value, len: usize) -> Result<usize, Error> {
    let index = match index {
        Value::Int(n) => *n,
        other => {
            return Err(runtime_fault(format!(
                "indices must be int, not '{}'",
                other.kind_name()
            )))
        }
    };

    let resolved = if index < 0 {
        i64::try_from(len).ok().and_then(|len| len.checked_add(index))
    } else {
        Some(index)
    };

    resolved
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n < len)
        .ok_or_else(|| runtime_fault(format!("index {} out of range", index)))
}

fn overflow() -> Error {
    runtime_fault("integer overflow")
}

fn bad_unary(op: UnaryOp, operand: &Value) -> Error {
    runtime_fault(format!(
        "bad operand type for unary {}: '{}'",
        op,
        operand.kind_name()
    ))
}

fn bad_binary(op: BinaryOp, left: &Value, right: &Value) -> Error {
    runtime_fault(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op,
        left.kind_name(),
        right.kind_name()
    ))
}
