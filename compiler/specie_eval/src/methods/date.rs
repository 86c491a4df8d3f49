//! Calendar arithmetic on `Date`.

use chrono::{Datelike, Days, NaiveDate};

use super::Method;
use crate::errors::{invalid_value, unsupported_operands, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{Arity, Value};

pub(super) const DATE: &[Method] = &[
    Method::new("add", Arity::exactly(1), add),
    Method::new("sub", Arity::exactly(1), sub),
    Method::new("year", Arity::exactly(0), year),
    Method::new("month", Arity::exactly(0), month),
    Method::new("day", Arity::exactly(0), day),
];

/// `date + days`.
fn add(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    match (receiver, &args[0]) {
        (Value::Date(date), Value::Int(days)) => shift(*date, *days, false),
        (left, right) => Err(unsupported_operands("add", left, right)),
    }
}

/// `date - days` is a date; `date - date` is the signed number of days.
fn sub(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    match (receiver, &args[0]) {
        (Value::Date(date), Value::Int(days)) => shift(*date, *days, true),
        (Value::Date(a), Value::Date(b)) => {
            Ok(Value::Int(a.signed_duration_since(*b).num_days()))
        }
        (left, right) => Err(unsupported_operands("sub", left, right)),
    }
}

/// Move `date` by `days`, backwards when `subtract` is set. Leaving the
/// calendar range chrono supports is an invalid value.
fn shift(date: NaiveDate, days: i64, subtract: bool) -> EvalResult {
    let step = Days::new(days.unsigned_abs());
    let shifted = if (days < 0) == subtract {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    let operator = if subtract { '-' } else { '+' };
    shifted
        .map(Value::Date)
        .ok_or_else(|| invalid_value(format!("Date {date} {operator} {days} is out of range")))
}

fn year(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(component(receiver, |date| i64::from(date.year())))
}

fn month(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(component(receiver, |date| i64::from(date.month())))
}

fn day(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(component(receiver, |date| i64::from(date.day())))
}

fn component(receiver: &Value, pick: fn(&NaiveDate) -> i64) -> Value {
    match receiver {
        Value::Date(date) => Value::Int(pick(date)),
        _ => Value::Null,
    }
}
