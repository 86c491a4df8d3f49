//! Argument extraction and shared comparison.

use std::cmp::Ordering;

use crate::errors::{invalid_value, unsupported_operands, wrong_arg_type, EvalError};
use crate::value::{int_to_float, MapKey, Value};

pub(super) fn int_arg(method: &str, args: &[Value], index: usize) -> Result<i64, EvalError> {
    match &args[index] {
        Value::Int(i) => Ok(*i),
        other => Err(wrong_arg_type(method, "an Int", other)),
    }
}

pub(super) fn str_arg<'a>(
    method: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, EvalError> {
    match &args[index] {
        Value::String(s) => Ok(s),
        other => Err(wrong_arg_type(method, "a String", other)),
    }
}

pub(super) fn key_arg(args: &[Value], index: usize) -> Result<MapKey, EvalError> {
    MapKey::new(args[index].clone())
}

/// `Int` view of a length or count.
pub(super) fn count_value(count: usize) -> Value {
    Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Map a possibly negative index onto `0..len`; negative counts from the end.
pub(super) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

pub(super) fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(int_to_float(*i)),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

/// Order two values of an ordered type.
///
/// Ints and Floats compare numerically with each other; Strings and Dates
/// only with their own type. Anything else is an unsupported operation named
/// after `operation`.
pub(crate) fn compare_values(
    operation: &'static str,
    left: &Value,
    right: &Value,
) -> Result<Ordering, EvalError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
        _ => match (as_float(left), as_float(right)) {
            (Some(a), Some(b)) => a
                .partial_cmp(&b)
                .ok_or_else(|| invalid_value("Cannot compare NaN")),
            _ => Err(unsupported_operands(operation, left, right)),
        },
    }
}
