//! Callable values: closures, native functions and bound methods.

use std::fmt;
use std::rc::Rc;

use specie_ir::{FunctionDecl, Name};

use super::Value;
use crate::environment::Env;
use crate::errors::{wrong_arg_count, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::methods::Method;
use crate::resolve::Resolutions;

/// How many positional arguments a callable accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` when a variadic parameter takes any excess.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(count: usize) -> Self {
        Arity {
            min: count,
            max: Some(count),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// `2`, `1 or more`, `between 1 and 3`.
    pub fn describe(self) -> String {
        match self.max {
            Some(max) if max == self.min => format!("{max}"),
            Some(max) => format!("between {} and {max}", self.min),
            None => format!("{} or more", self.min),
        }
    }

    pub fn check(self, count: usize) -> Result<(), EvalError> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(wrong_arg_count(&self.describe(), count))
        }
    }
}

/// A parameter with its default already evaluated.
#[derive(Clone, Debug)]
pub enum ParamBinding {
    Required,
    Optional(Value),
    Variadic,
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: Name,
    pub binding: ParamBinding,
}

/// A function literal closed over the environment it was created in.
///
/// The resolution table of the program that defined the function travels
/// with it: the body's variable distances are only meaningful against that
/// table, even when the function is called from a later input.
pub struct FunctionValue {
    pub params: Vec<Parameter>,
    pub decl: Rc<FunctionDecl>,
    pub closure: Env,
    pub resolutions: Rc<Resolutions>,
}

impl FunctionValue {
    pub fn arity(&self) -> Arity {
        let required = self
            .params
            .iter()
            .filter(|param| matches!(param.binding, ParamBinding::Required))
            .count();
        if self
            .params
            .iter()
            .any(|param| matches!(param.binding, ParamBinding::Variadic))
        {
            Arity::at_least(required)
        } else {
            Arity::between(required, self.params.len())
        }
    }

    /// Parameter list as written, with defaults shown by value.
    pub fn signature(&self) -> String {
        self.params
            .iter()
            .map(|param| match &param.binding {
                ParamBinding::Required => param.name.to_string(),
                ParamBinding::Optional(default) => format!("{} = {default}", param.name),
                ParamBinding::Variadic => format!("...{}", param.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({})", self.signature())
    }
}

pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult;

/// A function implemented by the host, installed in the global frame.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub call: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// `value.method` read without calling it.
#[derive(Debug)]
pub struct BoundMethod {
    pub receiver: Value,
    pub method: &'static Method,
}
