//! The cursor protocol as methods on `Iterator` values.

use super::Method;
use crate::errors::{iterator_in_use, unsupported_operand, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{Arity, Cursor, Heap, Value};

pub(super) const ITERATOR: &[Method] = &[
    Method::new("current", Arity::exactly(0), current),
    Method::new("advance", Arity::exactly(0), advance),
    Method::new("rewind", Arity::exactly(0), rewind),
    Method::new("delete", Arity::exactly(0), delete),
    Method::new("iter", Arity::exactly(0), iter),
    Method::new("toList", Arity::exactly(0), to_list),
];

fn cursor<'a>(
    receiver: &'a Value,
    method: &'static str,
) -> Result<&'a Heap<Box<dyn Cursor>>, EvalError> {
    match receiver {
        Value::Iterator(cursor) => Ok(cursor),
        other => Err(unsupported_operand(method, other)),
    }
}

fn current(interpreter: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let cursor = cursor(receiver, "current")?;
    let guard = cursor.try_borrow_mut().ok_or_else(iterator_in_use)?;
    guard.current(interpreter)
}

fn advance(interpreter: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let cursor = cursor(receiver, "advance")?;
    let mut guard = cursor.try_borrow_mut().ok_or_else(iterator_in_use)?;
    Ok(Value::Bool(guard.advance(interpreter)?))
}

fn rewind(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let cursor = cursor(receiver, "rewind")?;
    cursor.try_borrow_mut().ok_or_else(iterator_in_use)?.rewind();
    Ok(receiver.clone())
}

fn delete(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let cursor = cursor(receiver, "delete")?;
    cursor.try_borrow_mut().ok_or_else(iterator_in_use)?.delete()?;
    Ok(Value::Null)
}

fn iter(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(receiver.clone())
}

/// Every element from the start. The iterator's own position is unchanged.
fn to_list(interpreter: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    cursor(receiver, "toList")?;
    Ok(Value::list(interpreter.collect(receiver)?))
}
