//! `String` and `Regex` methods.

use regex::RegexBuilder;

use super::helpers::{count_value, int_arg, resolve_index, str_arg};
use super::Method;
use crate::errors::{
    invalid_value, undefined_index, unsupported_operands, wrong_arg_type, EvalError, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::value::{Arity, Value};

pub(super) const STRING: &[Method] = &[
    Method::new("add", Arity::exactly(1), add),
    Method::new("contains", Arity::exactly(1), contains),
    Method::new("match", Arity::exactly(1), string_match),
    Method::new("count", Arity::exactly(0), count),
    Method::new("at", Arity::exactly(1), at),
    Method::new("upper", Arity::exactly(0), upper),
    Method::new("lower", Arity::exactly(0), lower),
];

pub(super) const REGEX: &[Method] = &[
    Method::new("match", Arity::exactly(1), regex_match),
    Method::new("contains", Arity::exactly(1), regex_match),
];

fn text(receiver: &Value) -> &str {
    match receiver {
        Value::String(s) => s,
        _ => "",
    }
}

fn add(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    match (receiver, &args[0]) {
        (Value::String(a), Value::String(b)) => Ok(Value::string(&format!("{a}{b}"))),
        (left, right) => Err(unsupported_operands("add", left, right)),
    }
}

fn contains(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let needle = str_arg("contains", args, 0)?;
    Ok(Value::Bool(text(receiver).contains(needle)))
}

/// A String pattern is searched case-insensitively; a Regex keeps its flags.
fn string_match(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let haystack = text(receiver);
    match &args[0] {
        Value::Regex(regex) => Ok(Value::Bool(regex.compiled.is_match(haystack))),
        Value::String(pattern) => {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|err| bad_pattern(pattern, &err))?;
            Ok(Value::Bool(regex.is_match(haystack)))
        }
        other => Err(wrong_arg_type("match", "a String or Regex", other)),
    }
}

#[cold]
fn bad_pattern(pattern: &str, err: &regex::Error) -> EvalError {
    invalid_value(format!("Invalid regular expression '{pattern}': {err}"))
}

fn count(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(count_value(text(receiver).chars().count()))
}

fn at(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let index = int_arg("at", args, 0)?;
    let chars: Vec<char> = text(receiver).chars().collect();
    let position = resolve_index(index, chars.len()).ok_or_else(|| undefined_index(index))?;
    Ok(Value::string(chars[position].encode_utf8(&mut [0; 4])))
}

fn upper(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(Value::string(&text(receiver).to_uppercase()))
}

fn lower(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    Ok(Value::string(&text(receiver).to_lowercase()))
}

fn regex_match(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let Value::Regex(regex) = receiver else {
        return Err(wrong_arg_type("match", "a Regex receiver", receiver));
    };
    let haystack = str_arg("match", args, 0)?;
    Ok(Value::Bool(regex.compiled.is_match(haystack)))
}
