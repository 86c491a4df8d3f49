//! Ordering and arithmetic.
//!
//! `Int op Int` stays `Int` with overflow checking, except `div`, which
//! always yields a `Float`. Mixing `Int` and `Float` computes in `Float`.

use std::cmp::Ordering;

use super::helpers::{as_float, compare_values};
use super::Method;
use crate::errors::{
    division_by_zero, integer_overflow, unsupported_operand, unsupported_operands, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::value::{Arity, Value};

/// Comparison methods of the ordered types.
pub(super) const ORDERED: &[Method] = &[
    Method::new("lt", Arity::exactly(1), lt),
    Method::new("lte", Arity::exactly(1), lte),
    Method::new("gt", Arity::exactly(1), gt),
    Method::new("gte", Arity::exactly(1), gte),
    Method::new("cmp", Arity::exactly(1), cmp),
];

pub(super) const NUMERIC: &[Method] = &[
    Method::new("add", Arity::exactly(1), add),
    Method::new("sub", Arity::exactly(1), sub),
    Method::new("mul", Arity::exactly(1), mul),
    Method::new("div", Arity::exactly(1), div),
    Method::new("neg", Arity::exactly(0), neg),
];

fn lt(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(compare_values("lt", receiver, &args[0])?.is_lt()))
}

fn lte(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(compare_values("lte", receiver, &args[0])?.is_le()))
}

fn gt(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(compare_values("gt", receiver, &args[0])?.is_gt()))
}

fn gte(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(compare_values("gte", receiver, &args[0])?.is_ge()))
}

/// `-1`, `0` or `1`.
fn cmp(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let ordering = compare_values("cmp", receiver, &args[0])?;
    Ok(Value::Int(match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }))
}

fn arithmetic(
    operation: &'static str,
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return int_op(*a, *b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(operation));
    }
    match (as_float(left), as_float(right)) {
        (Some(a), Some(b)) => Ok(Value::Float(float_op(a, b))),
        _ => Err(unsupported_operands(operation, left, right)),
    }
}

fn add(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    arithmetic("add", receiver, &args[0], i64::checked_add, |a, b| a + b)
}

fn sub(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    arithmetic("sub", receiver, &args[0], i64::checked_sub, |a, b| a - b)
}

fn mul(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    arithmetic("mul", receiver, &args[0], i64::checked_mul, |a, b| a * b)
}

fn div(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let right = &args[0];
    match (as_float(receiver), as_float(right)) {
        (Some(_), Some(b)) if b == 0.0 => Err(division_by_zero()),
        (Some(a), Some(b)) => Ok(Value::Float(a / b)),
        _ => Err(unsupported_operands("div", receiver, right)),
    }
}

fn neg(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    match receiver {
        Value::Int(i) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("neg")),
        Value::Float(x) => Ok(Value::Float(-x)),
        other => Err(unsupported_operand("neg", other)),
    }
}
