//! Unit tests for the evaluator.
//!
//! This module contains tests for:
//! - Operator semantics and host-level faults
//! - Indexing and in-place list mutation
//! - Scoping of declarations and assignments
//! - Loops and control-flow signals
//! - Function calls and captured scopes

use pretty_assertions::assert_eq;

use super::{
    expr::eval_expr,
    function::Function,
    signal::RunSignal,
    stmt::run_block,
    value::Value,
};
use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorKind},
    lexer::lexer::Lexer,
    parser::{expr::parse_expr, lookups::BindingPower, parser::parse, parser::Parser},
    scope::RuntimeScope,
};

fn eval_in(source: &str, scope: &RuntimeScope) -> Result<Value, Error> {
    let mut parser = Parser::new(Lexer::new(source)).unwrap();
    let expr = parse_expr(&mut parser, BindingPower::Default).unwrap();
    eval_expr(&expr, scope)
}

fn eval(source: &str) -> Result<Value, Error> {
    eval_in(source, &RuntimeScope::new())
}

fn expect_value(source: &str, expected: Value) {
    match eval(source) {
        Ok(actual) => assert_eq!(actual, expected, "Expression: {}", source),
        Err(e) => panic!("Expression failed: {}\nInput: {}", e, source),
    }
}

fn expect_fault(source: &str) {
    match eval(source) {
        Ok(value) => panic!("Expected fault but got {} for: {}", value, source),
        Err(e) => assert_eq!(e.kind(), ErrorKind::Runtime, "Input: {}", source),
    }
}

fn run_program(source: &str) -> (RuntimeScope, Option<RunSignal>) {
    let block = parse(source).unwrap();
    let scope = RuntimeScope::new();
    let signal = run_block(&block, &scope).unwrap();
    (scope, signal)
}

fn str(s: &str) -> Value {
    Value::Str(s.to_string())
}

#[test]
fn test_literal_values() {
    expect_value("42", Value::Int(42));
    expect_value("3.14", Value::Float(3.14));
    expect_value("\"hi\"", str("hi"));
    expect_value("True", Value::Bool(true));
    expect_value("None", Value::Null);
}

#[test]
fn test_arithmetic_and_promotion() {
    expect_value("1 + 2 * 3", Value::Int(7));
    expect_value("(1 + 2) * 3", Value::Int(9));
    expect_value("10 - 2 - 3", Value::Int(11));
    expect_value("1 - 2 + 3", Value::Int(-4));
    expect_value("(10 - 2) - 3", Value::Int(5));
    expect_value("1 + 2.0", Value::Float(3.0));
    expect_value("7 / 2", Value::Float(3.5));
    expect_value("4 / 2", Value::Float(2.0));
    expect_value("True + True", Value::Int(2));
    expect_value("-7 % 3", Value::Int(-1));
    expect_value("7.5 % 2", Value::Float(1.5));
}

#[test]
fn test_unary_operators() {
    expect_value("-5", Value::Int(-5));
    expect_value("+True", Value::Int(1));
    expect_value("-2.5", Value::Float(-2.5));
    expect_value("~5", Value::Int(-6));
    expect_value("!0", Value::Bool(true));
    expect_value("!\"x\"", Value::Bool(false));
    expect_fault("~1.5");
    expect_fault("-\"a\"");
}

#[test]
fn test_bitwise_and_shift_operators() {
    expect_value("6 & 3", Value::Int(2));
    expect_value("6 | 3", Value::Int(7));
    expect_value("6 ^ 3", Value::Int(5));
    expect_value("1 << 4", Value::Int(16));
    expect_value("-16 >> 2", Value::Int(-4));
    expect_value("5 >> 100", Value::Int(0));
    expect_fault("1 << -1");
    expect_fault("1 << 64");
    expect_fault("1.0 & 1");
}

#[test]
fn test_host_faults() {
    expect_fault("1 / 0");
    expect_fault("1 % 0");
    expect_fault("9223372036854775807 + 1");
    expect_fault("\"a\" - \"b\"");
    expect_fault("None + 1");
}

#[test]
fn test_oversized_repetition_faults() {
    expect_fault("\"ab\" * 9223372036854775807");
    expect_fault("9223372036854775807 * \"ab\"");

    let scope = RuntimeScope::new();
    scope.define("xs", Value::list(vec![Value::Int(1), Value::Int(2)]));
    let error = eval_in("xs * 4611686018427387904", &scope).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Runtime);
    assert_eq!(error.to_string(), "runtime fault: repeated sequence is too long");

    scope.define("empty", Value::list(Vec::new()));
    assert_eq!(
        eval_in("empty * 9223372036854775807", &scope).unwrap(),
        Value::list(Vec::new())
    );
    expect_value("\"\" * 9223372036854775807", str(""));
}

#[test]
fn test_string_and_list_operators() {
    expect_value("\"ab\" + \"cd\"", str("abcd"));
    expect_value("\"ab\" * 2", str("abab"));
    expect_value("3 * \"x\"", str("xxx"));
    expect_value("\"ab\" * -1", str(""));

    let scope = RuntimeScope::new();
    scope.define("xs", Value::list(vec![Value::Int(1), Value::Int(2)]));
    assert_eq!(
        eval_in("xs + xs", &scope).unwrap(),
        Value::list(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(1),
            Value::Int(2)
        ])
    );
    assert_eq!(
        eval_in("xs * 2", &scope).unwrap(),
        eval_in("xs + xs", &scope).unwrap()
    );
}

#[test]
fn test_comparisons() {
    expect_value("1 < 2", Value::Bool(true));
    expect_value("2 <= 2.0", Value::Bool(true));
    expect_value("\"abc\" < \"abd\"", Value::Bool(true));
    expect_value("1 == 1.0", Value::Bool(true));
    expect_value("True == 1", Value::Bool(true));
    expect_value("\"1\" != 1", Value::Bool(true));
    expect_fault("\"a\" < 1");
}

#[test]
fn test_logical_operators_short_circuit() {
    // `missing` is never looked up.
    expect_value("False && missing", Value::Bool(false));
    expect_value("1 || missing", Value::Bool(true));
    expect_value("1 && \"x\"", Value::Bool(true));
    expect_value("0 || \"\"", Value::Bool(false));

    let error = eval("True && missing").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Name);
}

#[test]
fn test_indexing() {
    expect_value("\"hello\"[1]", str("e"));
    expect_value("\"hello\"[-1]", str("o"));
    expect_fault("\"hello\"[5]");
    expect_fault("\"hello\"[-6]");
    expect_fault("5[0]");

    let scope = RuntimeScope::new();
    scope.define(
        "grid",
        Value::list(vec![
            Value::list(vec![Value::Int(1), Value::Int(2)]),
            Value::list(vec![Value::Int(3), Value::Int(4)]),
        ]),
    );
    assert_eq!(eval_in("grid[1][0]", &scope).unwrap(), Value::Int(3));
    assert_eq!(eval_in("grid[-1][-1]", &scope).unwrap(), Value::Int(4));
    assert_eq!(eval_in("-grid[0][1]", &scope).unwrap(), Value::Int(-2));
}

#[test]
fn test_index_assignment_mutates_aliases() {
    let block = parse("let b: int[] = a; b[0] = 10; a[-1] = b[0] + 1;").unwrap();
    let scope = RuntimeScope::new();
    scope.define("a", Value::list(vec![Value::Int(1), Value::Int(2)]));

    run_block(&block, &scope).unwrap();

    assert_eq!(
        scope.find("a").unwrap(),
        Value::list(vec![Value::Int(10), Value::Int(11)])
    );
}

#[test]
fn test_string_item_assignment_faults() {
    let block = parse("s[0] = \"x\";").unwrap();
    let scope = RuntimeScope::new();
    scope.define("s", str("abc"));

    let error = run_block(&block, &scope).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Runtime);
}

#[test]
fn test_declaration_without_initializer_is_none() {
    let (scope, _) = run_program("let x: int, y: str = \"s\";");

    assert_eq!(scope.find("x").unwrap(), Value::Null);
    assert_eq!(scope.find("y").unwrap(), str("s"));
}

#[test]
fn test_block_scoping() {
    let (scope, _) = run_program(
        "let x: int = 1;
         { let y: int = 2; x = x + y; }
         if True { let x: int = 100; x = 5; }",
    );

    assert_eq!(scope.find("x").unwrap(), Value::Int(3));
    assert_eq!(scope.find("y").unwrap_err().kind(), ErrorKind::Name);
}

#[test]
fn test_assignment_to_undeclared_variable() {
    let block = parse("z = 1;").unwrap();
    let error = run_block(&block, &RuntimeScope::new()).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Name);
}

#[test]
fn test_if_else_chain() {
    let source = "let r: str;
        if n < 0 { r = \"neg\"; } else if n == 0 { r = \"zero\"; } else { r = \"pos\"; }";
    let block = parse(source).unwrap();

    for (n, expected) in [(-3, "neg"), (0, "zero"), (8, "pos")] {
        let scope = RuntimeScope::new();
        scope.define("n", Value::Int(n));
        run_block(&block, &scope).unwrap();
        assert_eq!(scope.find("r").unwrap(), str(expected));
    }
}

#[test]
fn test_while_loop() {
    let (scope, signal) = run_program(
        "let i: int = 0, total: int = 0;
         while i < 5 { i = i + 1; total = total + i; }",
    );

    assert_eq!(signal, None);
    assert_eq!(scope.find("total").unwrap(), Value::Int(15));
}

#[test]
fn test_break_and_continue() {
    let (scope, _) = run_program(
        "let i: int = 0, odd: int = 0;
         while True {
             i = i + 1;
             if i > 9 { break; }
             if i % 2 == 0 { continue; }
             odd = odd + i;
         }",
    );

    assert_eq!(scope.find("i").unwrap(), Value::Int(10));
    assert_eq!(scope.find("odd").unwrap(), Value::Int(25));
}

#[test]
fn test_loop_body_gets_fresh_scope_each_iteration() {
    let (scope, _) = run_program(
        "let i: int = 0, seen: int = 0;
         while i < 3 { let local: int; if local == None { seen = seen + 1; } local = i; i = i + 1; }",
    );

    assert_eq!(scope.find("seen").unwrap(), Value::Int(3));
}

#[test]
fn test_return_signal_propagates_out_of_loops() {
    let (_, signal) = run_program("while True { if True { return 7; } }");

    assert_eq!(signal, Some(RunSignal::Return(Value::Int(7))));
}

#[test]
fn test_function_call_binds_parameters() {
    let body = parse("if n < 2 { return n; } return n * 2;").unwrap();
    let function = Function::new(
        vec![("n".to_string(), Type::int())],
        Type::int(),
        body,
        RuntimeScope::new(),
    );

    assert_eq!(function.call(vec![Value::Int(1)]).unwrap(), Value::Int(1));
    assert_eq!(function.call(vec![Value::Int(21)]).unwrap(), Value::Int(42));
    assert_eq!(
        function.signature(),
        Type::function(Type::int(), vec![Type::int()])
    );
}

#[test]
fn test_function_without_return_yields_none() {
    let function = Function::new(vec![], Type::null(), parse("let x: int = 1;").unwrap(), RuntimeScope::new());

    assert_eq!(function.call(vec![]).unwrap(), Value::Null);
}

#[test]
fn test_function_arity_mismatch_faults() {
    let function = Function::new(
        vec![("a".to_string(), Type::int())],
        Type::int(),
        parse("return a;").unwrap(),
        RuntimeScope::new(),
    );

    let error = function.call(vec![]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Runtime);
}

#[test]
fn test_function_mutates_captured_scope() {
    let captured = RuntimeScope::new();
    captured.define("count", Value::Int(0));
    let function = Function::new(
        vec![],
        Type::int(),
        parse("count = count + 1; return count;").unwrap(),
        captured.clone(),
    );

    assert_eq!(function.call(vec![]).unwrap(), Value::Int(1));
    assert_eq!(function.call(vec![]).unwrap(), Value::Int(2));
    assert_eq!(captured.find("count").unwrap(), Value::Int(2));
}

#[test]
fn test_parameters_do_not_leak_into_captured_scope() {
    let captured = RuntimeScope::new();
    let function = Function::new(
        vec![("p".to_string(), Type::int())],
        Type::int(),
        parse("let q: int = p; return q;").unwrap(),
        captured.clone(),
    );

    function.call(vec![Value::Int(4)]).unwrap();
    assert!(captured.find("p").is_err());
    assert!(captured.find("q").is_err());
}
