//! Methods shared by every type.

use super::Method;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::{Arity, Value};

pub(super) const COMMON: &[Method] = &[
    Method::new("eq", Arity::exactly(1), eq),
    Method::new("neq", Arity::exactly(1), neq),
    Method::new("asBool", Arity::exactly(0), as_bool),
    Method::new("asString", Arity::exactly(0), as_string),
    Method::new("asHash", Arity::exactly(0), as_hash),
];

fn eq(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(*receiver == args[0]))
}

fn neq(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(*receiver != args[0]))
}

fn as_bool(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(Value::Bool(receiver.is_truthy()))
}

fn as_string(interpreter: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let text = interpreter.render(receiver)?;
    Ok(Value::string(&text))
}

fn as_hash(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(Value::Int(receiver.hash_code()))
}
