//! Capability method dispatch.
//!
//! Every operator lowers to a method call on its left operand (`in` on its
//! right operand), looked up in the receiver type's table through the
//! [`TypeRegistry`](crate::TypeRegistry). Member reads without a call yield
//! a bound method, except on records, where fields shadow methods.

use specie_ir::{BinaryOp, Name};

use super::Interpreter;
use crate::errors::{
    undefined_field, undefined_method, unsupported_operand, unsupported_operands, EvalResult,
};
use crate::methods::Method;
use crate::value::{BoundMethod, Value};

impl Interpreter {
    /// Call the method `name` of `receiver`.
    pub fn call_method(&mut self, receiver: &Value, name: &str, args: &[Value]) -> EvalResult {
        match self.registry.lookup(receiver.type_tag(), name) {
            Some(method) => self.invoke_method(method, receiver, args),
            None => Err(undefined_method(name, receiver)),
        }
    }

    pub(crate) fn invoke_method(
        &mut self,
        method: &'static Method,
        receiver: &Value,
        args: &[Value],
    ) -> EvalResult {
        method.arity.check(args.len())?;
        (method.call)(self, receiver, args)
    }

    /// `left op right`. A missing method is an unsupported operation naming
    /// both operand types.
    pub(crate) fn binary_op(&mut self, op: BinaryOp, left: Value, right: Value) -> EvalResult {
        let name = op.method_name();
        let (receiver, argument) = match op {
            BinaryOp::In => (right, left),
            _ => (left, right),
        };
        match self.registry.lookup(receiver.type_tag(), name) {
            Some(method) => self.invoke_method(method, &receiver, &[argument]),
            None => Err(unsupported_operands(name, &receiver, &argument)),
        }
    }

    pub(crate) fn unary_op(&mut self, name: &'static str, operand: &Value) -> EvalResult {
        match self.registry.lookup(operand.type_tag(), name) {
            Some(method) => self.invoke_method(method, operand, &[]),
            None => Err(unsupported_operand(name, operand)),
        }
    }

    /// `object.name` without a call.
    pub(crate) fn get_member(&mut self, object: &Value, name: &Name) -> EvalResult {
        if let Value::Record(record) = object {
            let field = record.borrow().get(name.as_str()).cloned();
            if let Some(field) = field {
                return Ok(field);
            }
        }
        match self.registry.lookup(object.type_tag(), name.as_str()) {
            Some(method) => Ok(Value::bound_method(BoundMethod {
                receiver: object.clone(),
                method,
            })),
            None if matches!(object, Value::Record(_)) => Err(undefined_field(name)),
            None => Err(undefined_method(name.as_str(), object)),
        }
    }
}
