//! Function creation, argument binding and calls.

use std::rc::Rc;

use smallvec::SmallVec;
use specie_ir::{Expr, FunctionDecl, Name, ParamKind};

use super::Interpreter;
use crate::errors::{
    duplicate_argument, invalid_call, not_callable, unexpected_keyword, wrong_arg_count,
    EvalError, EvalResult,
};
use crate::value::{FunctionValue, ParamBinding, Parameter, Value};

/// Positional arguments of one call; most calls pass a handful.
type Args = SmallVec<[Value; 4]>;

impl Interpreter {
    /// A closure over the current frame. Defaults are evaluated here, once.
    pub(crate) fn create_function(&mut self, decl: &Rc<FunctionDecl>) -> EvalResult {
        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let binding = match &param.kind {
                ParamKind::Required => ParamBinding::Required,
                ParamKind::Optional(default) => ParamBinding::Optional(self.evaluate(default)?),
                ParamKind::Variadic => ParamBinding::Variadic,
            };
            params.push(Parameter {
                name: param.name.clone(),
                binding,
            });
        }
        Ok(Value::function(FunctionValue {
            params,
            decl: Rc::clone(decl),
            closure: self.env.clone(),
            resolutions: Rc::clone(&self.resolutions),
        }))
    }

    pub(crate) fn evaluate_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        kwargs: &[(Name, Expr)],
    ) -> EvalResult {
        let callee = self.evaluate(callee)?;
        if !callee.is_callable() {
            return Err(not_callable(&callee));
        }
        let positional = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Args, _>>()?;
        let mut keywords = Vec::with_capacity(kwargs.len());
        for (name, arg) in kwargs {
            keywords.push((name.clone(), self.evaluate(arg)?));
        }
        self.call_with_keywords(&callee, &positional, keywords)
    }

    /// Call any callable value with positional arguments.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        self.call_with_keywords(callee, args, Vec::new())
    }

    pub fn call_with_keywords(
        &mut self,
        callee: &Value,
        args: &[Value],
        kwargs: Vec<(Name, Value)>,
    ) -> EvalResult {
        match callee {
            Value::Function(function) => self.call_function(function, args, kwargs),
            Value::Native(native) => {
                reject_keywords(&kwargs)?;
                native.arity.check(args.len())?;
                (native.call)(self, args)
            }
            Value::BoundMethod(bound) => {
                reject_keywords(&kwargs)?;
                self.invoke_method(bound.method, &bound.receiver, args)
            }
            other => Err(not_callable(other)),
        }
    }

    fn call_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: &[Value],
        kwargs: Vec<(Name, Value)>,
    ) -> EvalResult {
        let frame = function.closure.child();
        {
            let mut scope = frame.borrow_mut();
            for (name, value) in bind_arguments(function, args, kwargs)? {
                scope.define(name, value);
            }
        }
        let mut scoped = self.scoped_with(frame, Rc::clone(&function.resolutions));
        scoped.evaluate(&function.decl.body)
    }
}

fn reject_keywords(kwargs: &[(Name, Value)]) -> Result<(), EvalError> {
    match kwargs.first() {
        Some((name, _)) => Err(invalid_call(format!(
            "Built-in functions take no keyword arguments, got '{name}'"
        ))),
        None => Ok(()),
    }
}

/// Match arguments to parameters: positionals fill the slots before the
/// variadic in order, the variadic takes the rest, keywords fill slots by
/// name, and unfilled optional slots take their defaults.
fn bind_arguments(
    function: &FunctionValue,
    args: &[Value],
    kwargs: Vec<(Name, Value)>,
) -> Result<Vec<(Name, Value)>, EvalError> {
    let params = &function.params;
    let variadic = params
        .iter()
        .position(|param| matches!(param.binding, ParamBinding::Variadic));
    let fixed = variadic.unwrap_or(params.len());
    if variadic.is_none() && args.len() > fixed {
        return Err(wrong_arg_count(&function.arity().describe(), args.len()));
    }

    let mut slots: Vec<Option<Value>> = vec![None; params.len()];
    for (slot, arg) in slots.iter_mut().zip(args.iter().take(fixed)) {
        *slot = Some(arg.clone());
    }
    if let Some(index) = variadic {
        let rest = args.get(fixed..).unwrap_or_default().to_vec();
        slots[index] = Some(Value::list(rest));
    }

    for (name, value) in kwargs {
        let index = params
            .iter()
            .position(|param| param.name == name)
            .ok_or_else(|| unexpected_keyword(&name))?;
        if slots[index].is_some() {
            return Err(duplicate_argument(&name));
        }
        slots[index] = Some(value);
    }

    params
        .iter()
        .zip(slots)
        .map(|(param, slot)| {
            let value = match (slot, &param.binding) {
                (Some(value), _) => value,
                (None, ParamBinding::Optional(default)) => default.clone(),
                (None, ParamBinding::Variadic) => Value::list(Vec::new()),
                (None, ParamBinding::Required) => {
                    return Err(wrong_arg_count(&function.arity().describe(), args.len()));
                }
            };
            Ok((param.name.clone(), value))
        })
        .collect()
}
