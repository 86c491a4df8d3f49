//! Capability methods of the built-in types.
//!
//! Each type's methods are a static registration slice: name, arity and a
//! plain function pointer. The [`TypeRegistry`](crate::TypeRegistry) indexes
//! the slices once at startup; the interpreter dispatches through it and
//! never matches on method names itself.
//!
//! Arity is checked by the dispatcher before a method function runs, so the
//! functions index their arguments directly.
//!
//! # Module Structure
//!
//! - [`common`]: methods every value has (`eq`, `asString`, ...)
//! - [`numeric`]: ordering and arithmetic on `Int`, `Float`, `String`, `Date`
//! - [`text`]: `String` and `Regex`
//! - [`date`]: calendar arithmetic
//! - [`collections`]: `List`, `Record` and `Map`
//! - [`iterator`]: the cursor protocol exposed to programs
//! - [`helpers`]: argument extraction and comparison

mod collections;
mod common;
mod date;
mod helpers;
mod iterator;
mod numeric;
mod text;

use std::fmt;

use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::{Arity, TypeTag, Value};

pub(crate) use helpers::compare_values;

/// Signature shared by every built-in method: interpreter, receiver, args.
pub type MethodFn = fn(&mut Interpreter, &Value, &[Value]) -> EvalResult;

pub struct Method {
    pub name: &'static str,
    pub arity: Arity,
    pub call: MethodFn,
}

impl Method {
    pub const fn new(name: &'static str, arity: Arity, call: MethodFn) -> Self {
        Method { name, arity, call }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({}/{})", self.name, self.arity.describe())
    }
}

/// Methods available on every value, consulted after the type's own table.
pub(crate) fn common_methods() -> &'static [Method] {
    common::COMMON
}

/// The method tables of one type, most specific first.
pub(crate) fn type_methods(tag: TypeTag) -> &'static [&'static [Method]] {
    match tag {
        TypeTag::Int | TypeTag::Float => &[numeric::NUMERIC, numeric::ORDERED],
        TypeTag::String => &[text::STRING, numeric::ORDERED],
        TypeTag::Regex => &[text::REGEX],
        TypeTag::Date => &[date::DATE, numeric::ORDERED],
        TypeTag::List => &[collections::LIST],
        TypeTag::Record => &[collections::RECORD],
        TypeTag::Map => &[collections::MAP],
        TypeTag::Iterator => &[iterator::ITERATOR],
        TypeTag::Null
        | TypeTag::Bool
        | TypeTag::Function
        | TypeTag::NativeFunction
        | TypeTag::BoundMethod => &[],
    }
}

#[cfg(test)]
mod tests;
