//! Tree-walking interpreter.
//!
//! `evaluate` is the single entry point for every node kind. The current
//! frame and the resolution table in effect travel in the interpreter;
//! entering a block, function body, loop iteration or stage swaps both
//! through a [`ScopedInterpreter`] guard that restores them on exit,
//! including on early return through `?`.
//!
//! Functions carry the resolution table of the unit that defined them, and
//! calling one swaps that table in for the duration of the body.

mod builder;
mod function_call;
mod method_dispatch;
mod scope_guard;

use std::rc::Rc;

use specie_ir::{Expr, ExprKind, LogicalOp, Name, NodeId, UnaryOp};
use specie_stack::ensure_sufficient_stack;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use crate::environment::Env;
use crate::errors::{
    cannot_set_field, iterator_in_use, not_iterable, undefined_variable, EvalError, EvalResult,
};
use crate::include::{FileResolver, IncludeFrame};
use crate::intern::LiteralInterner;
use crate::query::evaluate_query;
use crate::registry::TypeRegistry;
use crate::resolve::{resolve, Resolution, Resolutions};
use crate::value::{Cursor, Heap, Record, Value};
use crate::SpecieError;

pub struct Interpreter {
    registry: Rc<TypeRegistry>,
    /// The frame top-level declarations and natives live in.
    globals: Env,
    /// The frame the node being evaluated sees.
    pub(crate) env: Env,
    /// Resolutions of the unit the current code belongs to.
    pub(crate) resolutions: Rc<Resolutions>,
    pub(crate) interner: LiteralInterner,
    /// Files being executed, innermost last.
    pub(crate) includes: Vec<IncludeFrame>,
    pub(crate) resolver: Box<dyn FileResolver>,
}

impl Interpreter {
    /// An interpreter with the default registry, the global natives, and no
    /// file access.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn globals(&self) -> &Env {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }

    /// Parse, resolve and evaluate one program in the global frame.
    ///
    /// Declarations made by earlier calls stay visible. An error aborts this
    /// input only.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn execute(&mut self, source: &str) -> Result<Value, SpecieError> {
        let mut tree = specie_parse::parse_module(source)?;
        self.interner.intern(&mut tree);
        let resolutions = Rc::new(resolve(&tree)?);
        Ok(self.run_unit(&tree, resolutions)?)
    }

    /// Evaluate a parsed unit in the global frame under its own resolutions.
    pub(crate) fn run_unit(&mut self, tree: &Expr, resolutions: Rc<Resolutions>) -> EvalResult {
        let globals = self.globals.clone();
        let mut scoped = self.scoped_with(globals, resolutions);
        scoped.evaluate(tree)
    }

    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(expr)).map_err(|err| err.or_at(expr.location))
    }

    fn evaluate_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from_literal(literal)),
            ExprKind::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.evaluate(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }
            ExprKind::Record(fields) => {
                let mut record = Record::new();
                for (name, value) in fields {
                    let value = self.evaluate(value)?;
                    record.set(name.clone(), value);
                }
                Ok(Value::record(record))
            }
            ExprKind::Variable(name) => self.read_variable(expr.id, name),
            ExprKind::Grouping(inner) => self.evaluate(inner),
            ExprKind::Call {
                callee,
                args,
                kwargs,
            } => self.evaluate_call(callee, args, kwargs),
            ExprKind::Get { object, name } => {
                let object = self.evaluate(object)?;
                self.get_member(&object, name)
            }
            ExprKind::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(object)?;
                let value = self.evaluate(value)?;
                match &object {
                    Value::Record(record) => {
                        record.borrow_mut().set(name.clone(), value.clone());
                        Ok(value)
                    }
                    other => Err(cannot_set_field(name, other)),
                }
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
                    UnaryOp::Neg => self.unary_op("neg", &operand),
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.binary_op(*op, left, right)
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.evaluate(left)?.is_truthy();
                let decided = match op {
                    LogicalOp::And => !left,
                    LogicalOp::Or => left,
                };
                if decided {
                    Ok(Value::Bool(left))
                } else {
                    Ok(Value::Bool(self.evaluate(right)?.is_truthy()))
                }
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.evaluate(else_branch)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::For {
                variable,
                iterable,
                body,
            } => {
                let iterable = self.evaluate(iterable)?;
                self.evaluate_for(variable, &iterable, body)
            }
            ExprKind::Query {
                variable,
                source,
                stages,
            } => {
                let source = self.evaluate(source)?;
                evaluate_query(self, variable, &source, stages)
            }
            ExprKind::Function(decl) => self.create_function(decl),
            ExprKind::Assignment { name, value } => {
                let value = self.evaluate(value)?;
                self.assign_variable(expr.id, name, value.clone())?;
                Ok(value)
            }
            ExprKind::Declaration { name, value } => {
                let value = self.evaluate(value)?;
                self.env.borrow_mut().define(name.clone(), value);
                Ok(Value::Null)
            }
            ExprKind::Block(items) => {
                self.with_child_scope(|scoped| scoped.evaluate_sequence(items))
            }
            ExprKind::Module(items) => self.evaluate_sequence(items),
        }
    }

    /// Value of the last item, or null for an empty sequence.
    fn evaluate_sequence(&mut self, items: &[Expr]) -> EvalResult {
        let mut last = Value::Null;
        for item in items {
            last = self.evaluate(item)?;
        }
        Ok(last)
    }

    fn read_variable(&mut self, id: NodeId, name: &Name) -> EvalResult {
        let value = match self.resolutions.get(id) {
            Some(Resolution::Local(distance)) => self.env.get_at(distance, name.as_str()),
            Some(Resolution::Dynamic) => self.env.borrow().lookup(name.as_str()),
            None => self.globals.borrow().get(name.as_str()),
        };
        value.ok_or_else(|| undefined_variable(name))
    }

    fn assign_variable(&mut self, id: NodeId, name: &Name, value: Value) -> Result<(), EvalError> {
        let assigned = match self.resolutions.get(id) {
            Some(Resolution::Local(distance)) => self.env.assign_at(distance, name.as_str(), value),
            Some(Resolution::Dynamic) => self.env.borrow_mut().assign(name.as_str(), value),
            None => self.globals.borrow_mut().assign(name.as_str(), value),
        };
        if assigned {
            Ok(())
        } else {
            Err(undefined_variable(name))
        }
    }

    /// One child frame per element, binding `variable`; collects the body
    /// values into a list.
    fn evaluate_for(&mut self, variable: &Name, iterable: &Value, body: &Expr) -> EvalResult {
        let cursor = self.iterate(iterable)?;
        let mut results = Vec::new();
        while self.advance_shared(&cursor)? {
            let element = self.current_shared(&cursor)?;
            let frame = self.env.child();
            frame.borrow_mut().define(variable.clone(), element);
            let mut scoped = self.scoped_env(frame);
            results.push(scoped.evaluate(body)?);
        }
        Ok(Value::list(results))
    }

    /// A cursor over `value`, positioned before the first element.
    ///
    /// Iterator values are forked, leaving their own position alone;
    /// containers get a fresh cursor.
    pub(crate) fn iterate(&mut self, value: &Value) -> Result<Heap<Box<dyn Cursor>>, EvalError> {
        match value {
            Value::Iterator(cursor) => {
                let fork = cursor.try_borrow().ok_or_else(iterator_in_use)?.fork()?;
                Ok(Heap::from_cursor(fork))
            }
            other => other
                .cursor()
                .map(Heap::from_cursor)
                .ok_or_else(|| not_iterable(other)),
        }
    }

    pub(crate) fn advance_shared(&mut self, cursor: &Heap<Box<dyn Cursor>>) -> Result<bool, EvalError> {
        let mut guard = cursor.try_borrow_mut().ok_or_else(iterator_in_use)?;
        guard.advance(self)
    }

    pub(crate) fn current_shared(&mut self, cursor: &Heap<Box<dyn Cursor>>) -> EvalResult {
        let guard = cursor.try_borrow().ok_or_else(iterator_in_use)?;
        guard.current(self)
    }

    /// Every element of an iterable value, in order.
    pub fn collect(&mut self, value: &Value) -> Result<Vec<Value>, EvalError> {
        let cursor = self.iterate(value)?;
        let mut items = Vec::new();
        while self.advance_shared(&cursor)? {
            items.push(self.current_shared(&cursor)?);
        }
        Ok(items)
    }

    /// Display text of a value, with lazy iterators materialized.
    pub fn render(&mut self, value: &Value) -> Result<String, EvalError> {
        match value {
            Value::Iterator(_) => {
                let items = self.collect(value)?;
                self.render_items(&items)
            }
            Value::List(items) => {
                let items = items.borrow().clone();
                self.render_items(&items)
            }
            other => Ok(other.to_string()),
        }
    }

    fn render_items(&mut self, items: &[Value]) -> Result<String, EvalError> {
        let rendered = items
            .iter()
            .map(|item| self.render(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("[{}]", rendered.join(", ")))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
