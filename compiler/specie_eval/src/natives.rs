//! Functions installed in the global frame.
//!
//! Most forward to a capability method of their first argument, so
//! `count(xs)` and `xs.count()` are the same call. The comparison functions
//! are reflective: when the first argument has no such method, the mirrored
//! method of the second is tried instead (`lt(a, b)` becomes `b.gt(a)`).

use crate::errors::{unsupported_operands, wrong_arg_type, EvalResult};
use crate::interpreter::Interpreter;
use crate::query::NumericSum;
use crate::value::{Arity, MapValue, NativeFunction, Value};

pub(crate) static NATIVES: &[NativeFunction] = &[
    native("at", Arity::exactly(2), at),
    native("count", Arity::exactly(1), count),
    native("eq", Arity::exactly(2), eq),
    native("neq", Arity::exactly(2), neq),
    native("lt", Arity::exactly(2), lt),
    native("lte", Arity::exactly(2), lte),
    native("gt", Arity::exactly(2), gt),
    native("gte", Arity::exactly(2), gte),
    native("match", Arity::exactly(2), match_),
    native("contains", Arity::exactly(2), contains),
    native("sum", Arity::exactly(1), sum),
    native("avg", Arity::exactly(1), avg),
    native("type", Arity::exactly(1), type_of),
    native("list", Arity::exactly(1), list),
    native("map", Arity::exactly(0), map),
    native("include", Arity::exactly(1), include),
];

const fn native(
    name: &'static str,
    arity: Arity,
    call: fn(&mut Interpreter, &[Value]) -> EvalResult,
) -> NativeFunction {
    NativeFunction { name, arity, call }
}

fn at(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    interpreter.call_method(&args[0], "at", &args[1..])
}

fn count(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    interpreter.call_method(&args[0], "count", &[])
}

fn match_(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    interpreter.call_method(&args[0], "match", &args[1..])
}

fn contains(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    interpreter.call_method(&args[0], "contains", &args[1..])
}

/// `a.method(b)`, or `b.mirror(a)` when `a` has no `method`.
fn reflective(
    interpreter: &mut Interpreter,
    method: &'static str,
    mirror: &'static str,
    args: &[Value],
) -> EvalResult {
    let (left, right) = (&args[0], &args[1]);
    if interpreter.registry().has_method(left.type_tag(), method) {
        return interpreter.call_method(left, method, &[right.clone()]);
    }
    if interpreter.registry().has_method(right.type_tag(), mirror) {
        return interpreter.call_method(right, mirror, &[left.clone()]);
    }
    Err(unsupported_operands(method, left, right))
}

fn eq(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    reflective(interpreter, "eq", "eq", args)
}

fn neq(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    reflective(interpreter, "neq", "neq", args)
}

fn lt(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    reflective(interpreter, "lt", "gt", args)
}

fn lte(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    reflective(interpreter, "lte", "gte", args)
}

fn gt(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    reflective(interpreter, "gt", "lt", args)
}

fn gte(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    reflective(interpreter, "gte", "lte", args)
}

fn sum(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    let mut total = NumericSum::new("sum");
    for item in interpreter.collect(&args[0])? {
        total.add(&item)?;
    }
    Ok(total.total())
}

fn avg(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    let mut total = NumericSum::new("avg");
    for item in interpreter.collect(&args[0])? {
        total.add(&item)?;
    }
    Ok(total.average())
}

fn type_of(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::string(args[0].type_tag().name()))
}

fn list(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::list(interpreter.collect(&args[0])?))
}

fn map(_: &mut Interpreter, _: &[Value]) -> EvalResult {
    Ok(Value::map(MapValue::new()))
}

fn include(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::String(path) => interpreter.include(path),
        other => Err(wrong_arg_type("include", "a String", other)),
    }
}
