//! Container methods: `List`, `Record` and `Map`.
//!
//! Mutating methods change the container in place and return it, so calls
//! can be chained: `xs.insert(1).insert(2)`.

use specie_ir::Name;

use super::helpers::{count_value, int_arg, key_arg, resolve_index, str_arg};
use super::Method;
use crate::errors::{
    not_iterable, undefined_field, undefined_index, undefined_key, unsupported_operand,
    EvalError, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::value::{Arity, Heap, MapKey, MapValue, Record, Value};

pub(super) const LIST: &[Method] = &[
    Method::new("count", Arity::exactly(0), count),
    Method::new("at", Arity::exactly(1), list_at),
    Method::new("insert", Arity::exactly(1), list_insert),
    Method::new("add", Arity::exactly(1), list_insert),
    Method::new("addAll", Arity::exactly(1), list_add_all),
    Method::new("delete", Arity::exactly(1), list_delete),
    Method::new("contains", Arity::exactly(1), list_contains),
    Method::new("iter", Arity::exactly(0), iter),
];

pub(super) const RECORD: &[Method] = &[
    Method::new("count", Arity::exactly(0), count),
    Method::new("at", Arity::exactly(1), record_at),
    Method::new("insert", Arity::exactly(2), record_insert),
    Method::new("delete", Arity::exactly(1), record_delete),
    Method::new("contains", Arity::exactly(1), record_contains),
    Method::new("iter", Arity::exactly(0), iter),
];

pub(super) const MAP: &[Method] = &[
    Method::new("count", Arity::exactly(0), count),
    Method::new("at", Arity::exactly(1), map_at),
    Method::new("insert", Arity::exactly(2), map_insert),
    Method::new("delete", Arity::exactly(1), map_delete),
    Method::new("contains", Arity::exactly(1), map_contains),
    Method::new("iter", Arity::exactly(0), iter),
    Method::new("keys", Arity::exactly(0), map_keys),
    Method::new("values", Arity::exactly(0), map_values),
];

fn count(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    match receiver {
        Value::List(items) => Ok(count_value(items.borrow().len())),
        Value::Record(record) => Ok(count_value(record.borrow().len())),
        Value::Map(map) => Ok(count_value(map.borrow().len())),
        other => Err(unsupported_operand("count", other)),
    }
}

fn iter(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    receiver
        .cursor()
        .map(Value::iterator)
        .ok_or_else(|| not_iterable(receiver))
}

// List

fn list<'a>(receiver: &'a Value, method: &'static str) -> Result<&'a Heap<Vec<Value>>, EvalError> {
    match receiver {
        Value::List(items) => Ok(items),
        other => Err(unsupported_operand(method, other)),
    }
}

fn list_at(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let index = int_arg("at", args, 0)?;
    let items = list(receiver, "at")?.borrow();
    resolve_index(index, items.len())
        .map(|position| items[position].clone())
        .ok_or_else(|| undefined_index(index))
}

fn list_insert(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    list(receiver, "insert")?.borrow_mut().push(args[0].clone());
    Ok(receiver.clone())
}

fn list_add_all(interpreter: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let items = list(receiver, "addAll")?;
    let extra = interpreter.collect(&args[0])?;
    items.borrow_mut().extend(extra);
    Ok(receiver.clone())
}

/// Removes the first equal item; deleting a missing item is not an error.
///
/// The search runs under a shared borrow because comparing an item may
/// borrow this same list again (`xs.delete(xs)` when `xs` holds itself).
fn list_delete(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let items = list(receiver, "delete")?;
    let position = items.borrow().iter().position(|item| *item == args[0]);
    if let Some(position) = position {
        items.borrow_mut().remove(position);
    }
    Ok(receiver.clone())
}

fn list_contains(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let items = list(receiver, "contains")?.borrow();
    Ok(Value::Bool(items.contains(&args[0])))
}

// Record

fn record<'a>(receiver: &'a Value, method: &'static str) -> Result<&'a Heap<Record>, EvalError> {
    match receiver {
        Value::Record(record) => Ok(record),
        other => Err(unsupported_operand(method, other)),
    }
}

fn record_at(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let name = str_arg("at", args, 0)?;
    record(receiver, "at")?
        .borrow()
        .get(name)
        .cloned()
        .ok_or_else(|| undefined_field(&Name::new(name)))
}

fn record_insert(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let name = str_arg("insert", args, 0)?;
    record(receiver, "insert")?
        .borrow_mut()
        .set(Name::new(name), args[1].clone());
    Ok(receiver.clone())
}

fn record_delete(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let name = str_arg("delete", args, 0)?;
    record(receiver, "delete")?
        .borrow_mut()
        .remove(name)
        .ok_or_else(|| undefined_field(&Name::new(name)))?;
    Ok(receiver.clone())
}

fn record_contains(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let name = str_arg("contains", args, 0)?;
    Ok(Value::Bool(record(receiver, "contains")?.borrow().contains(name)))
}

// Map

fn map<'a>(receiver: &'a Value, method: &'static str) -> Result<&'a Heap<MapValue>, EvalError> {
    match receiver {
        Value::Map(map) => Ok(map),
        other => Err(unsupported_operand(method, other)),
    }
}

fn map_at(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let key = key_arg(args, 0)?;
    map(receiver, "at")?
        .borrow()
        .get(&key)
        .cloned()
        .ok_or_else(|| undefined_key(key.value()))
}

fn map_insert(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let key = key_arg(args, 0)?;
    map(receiver, "insert")?
        .borrow_mut()
        .insert(key, args[1].clone());
    Ok(receiver.clone())
}

/// Deleting a missing key is not an error.
fn map_delete(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let key = key_arg(args, 0)?;
    map(receiver, "delete")?.borrow_mut().remove(&key);
    Ok(receiver.clone())
}

fn map_contains(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let entries = map(receiver, "contains")?;
    let found = MapKey::new(args[0].clone()).is_ok_and(|key| entries.borrow().contains(&key));
    Ok(Value::Bool(found))
}

fn map_keys(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let keys = map(receiver, "keys")?
        .borrow()
        .keys()
        .map(|key| key.value().clone())
        .collect();
    Ok(Value::list(keys))
}

fn map_values(_: &mut Interpreter, receiver: &Value, _: &[Value]) -> EvalResult {
    let values = map(receiver, "values")?
        .borrow()
        .iter()
        .map(|(_, value)| value.clone())
        .collect();
    Ok(Value::list(values))
}
