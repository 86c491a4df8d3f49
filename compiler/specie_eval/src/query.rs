//! Query pipelines: `from v in source stage...`.
//!
//! Lazy stages wrap the source cursor in decorators; a query ending in one
//! of them evaluates to an `Iterator` value that runs the stages as it is
//! advanced. A terminal stage drives the pipeline to the end and produces a
//! single value.
//!
//! Per-element expressions run in a fresh frame whose parent is the frame
//! the query was evaluated in. The frame binds the query variable and, when
//! the element is a record, every field of it.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use specie_ir::{Expr, Name, Stage, StageKind};

use crate::environment::Env;
use crate::errors::{
    integer_overflow, invalid_type, invalid_value, iterator_in_use, iterator_not_advanced,
    not_iterable, EvalError, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::methods::compare_values;
use crate::resolve::Resolutions;
use crate::value::{int_to_float, Cursor, Value};

/// Where per-element expressions of one query are evaluated.
struct StageContext {
    env: Env,
    variable: Name,
    resolutions: Rc<Resolutions>,
}

impl StageContext {
    fn evaluate(&self, interpreter: &mut Interpreter, expr: &Expr, element: Value) -> EvalResult {
        let frame = self.env.child();
        {
            let mut scope = frame.borrow_mut();
            if let Value::Record(record) = &element {
                for (name, value) in record.borrow().iter() {
                    scope.define(name.clone(), value.clone());
                }
            }
            scope.define(self.variable.clone(), element);
        }
        let mut scoped = interpreter.scoped_with(frame, Rc::clone(&self.resolutions));
        scoped.evaluate(expr)
    }
}

pub(crate) fn evaluate_query(
    interpreter: &mut Interpreter,
    variable: &Name,
    source: &Value,
    stages: &[Stage],
) -> EvalResult {
    let context = Rc::new(StageContext {
        env: interpreter.env.clone(),
        variable: variable.clone(),
        resolutions: Rc::clone(&interpreter.resolutions),
    });
    let mut cursor = source_cursor(source)?;
    for stage in stages {
        if stage.kind.is_terminal() {
            return run_terminal(interpreter, &context, cursor, &stage.kind)
                .map_err(|err| err.or_at(stage.location));
        }
        cursor = decorate(interpreter, &context, cursor, &stage.kind)
            .map_err(|err| err.or_at(stage.location))?;
    }
    tracing::trace!(stages = stages.len(), "lazy query");
    Ok(Value::iterator(cursor))
}

fn source_cursor(source: &Value) -> Result<Box<dyn Cursor>, EvalError> {
    match source {
        Value::Iterator(shared) => shared.try_borrow().ok_or_else(iterator_in_use)?.fork(),
        other => other.cursor().ok_or_else(|| not_iterable(other)),
    }
}

fn decorate(
    interpreter: &mut Interpreter,
    context: &Rc<StageContext>,
    inner: Box<dyn Cursor>,
    kind: &StageKind,
) -> Result<Box<dyn Cursor>, EvalError> {
    let context = Rc::clone(context);
    Ok(match kind {
        StageKind::Select(expr) => Box::new(Select {
            inner,
            context,
            expr: Rc::new(expr.clone()),
            value: None,
        }),
        StageKind::Where(expr) => Box::new(Where {
            inner,
            context,
            predicate: Rc::new(expr.clone()),
        }),
        StageKind::Distinct => Box::new(Distinct {
            inner,
            seen: FxHashMap::default(),
        }),
        StageKind::Drop(count) => Box::new(Skip {
            inner,
            count: stage_count(interpreter, count, "drop")?,
            started: false,
        }),
        StageKind::Take(count) => Box::new(Take {
            inner,
            count: stage_count(interpreter, count, "take")?,
            taken: 0,
            exhausted: false,
        }),
        terminal => {
            return Err(invalid_value(format!(
                "Stage '{}' must be the last stage of a query",
                terminal.name()
            )))
        }
    })
}

/// `drop n`/`take n` evaluate `n` once, in the scope enclosing the query.
fn stage_count(interpreter: &mut Interpreter, expr: &Expr, stage: &str) -> Result<usize, EvalError> {
    match interpreter.evaluate(expr)? {
        Value::Int(n) => usize::try_from(n)
            .map_err(|_| invalid_value(format!("{stage} expects a non-negative count, got {n}"))),
        other => Err(invalid_type(format!(
            "{stage} expects an Int, got {}",
            other.type_tag()
        ))),
    }
}

fn run_terminal(
    interpreter: &mut Interpreter,
    context: &StageContext,
    mut cursor: Box<dyn Cursor>,
    kind: &StageKind,
) -> EvalResult {
    match kind {
        StageKind::Count => {
            let mut count = 0;
            while cursor.advance(interpreter)? {
                count += 1;
            }
            Ok(count_value(count))
        }
        StageKind::Sum(key) => {
            let mut sum = NumericSum::new("sum");
            while let Some(value) = next_value(interpreter, context, &mut *cursor, key.as_ref())? {
                sum.add(&value)?;
            }
            Ok(sum.total())
        }
        StageKind::Average(key) => {
            let mut sum = NumericSum::new("average");
            while let Some(value) = next_value(interpreter, context, &mut *cursor, key.as_ref())? {
                sum.add(&value)?;
            }
            Ok(sum.average())
        }
        StageKind::Min(key) | StageKind::Max(key) => {
            let want_max = matches!(kind, StageKind::Max(_));
            let mut best: Option<Value> = None;
            while let Some(value) = next_value(interpreter, context, &mut *cursor, key.as_ref())? {
                best = Some(match best {
                    None => value,
                    Some(current) => {
                        let ordering = compare_values(kind.name(), &value, &current)?;
                        let better = if want_max {
                            ordering.is_gt()
                        } else {
                            ordering.is_lt()
                        };
                        if better {
                            value
                        } else {
                            current
                        }
                    }
                });
            }
            Ok(best.unwrap_or(Value::Null))
        }
        StageKind::Any(predicate) => {
            while let Some(value) = next_value(interpreter, context, &mut *cursor, Some(predicate))? {
                if value.is_truthy() {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        StageKind::All(predicate) => {
            while let Some(value) = next_value(interpreter, context, &mut *cursor, Some(predicate))? {
                if !value.is_truthy() {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }
        StageKind::Fold { init, func } => {
            let mut acc = interpreter.evaluate(init)?;
            let func = interpreter.evaluate(func)?;
            while let Some(element) = next_value(interpreter, context, &mut *cursor, None)? {
                acc = interpreter.call_value(&func, &[acc, element])?;
            }
            Ok(acc)
        }
        StageKind::Each(expr) => {
            while next_value(interpreter, context, &mut *cursor, Some(expr))?.is_some() {}
            Ok(Value::Null)
        }
        StageKind::Delete => {
            let mut count = 0;
            while cursor.advance(interpreter)? {
                cursor.delete()?;
                count += 1;
            }
            Ok(count_value(count))
        }
        lazy => Err(invalid_value(format!(
            "Stage '{}' does not end a query",
            lazy.name()
        ))),
    }
}

/// Advance once; the element, or its key when the stage has a key
/// expression.
fn next_value(
    interpreter: &mut Interpreter,
    context: &StageContext,
    cursor: &mut dyn Cursor,
    key: Option<&Expr>,
) -> Result<Option<Value>, EvalError> {
    if !cursor.advance(interpreter)? {
        return Ok(None);
    }
    let element = cursor.current(interpreter)?;
    match key {
        Some(key) => context.evaluate(interpreter, key, element).map(Some),
        None => Ok(Some(element)),
    }
}

fn count_value(count: usize) -> Value {
    Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Running sum of numeric values. Stays an `Int` until a `Float` is added.
pub(crate) struct NumericSum {
    operation: &'static str,
    int: i64,
    float: f64,
    is_float: bool,
    count: usize,
}

impl NumericSum {
    pub(crate) fn new(operation: &'static str) -> Self {
        NumericSum {
            operation,
            int: 0,
            float: 0.0,
            is_float: false,
            count: 0,
        }
    }

    pub(crate) fn add(&mut self, value: &Value) -> Result<(), EvalError> {
        match value {
            Value::Int(i) if self.is_float => self.float += int_to_float(*i),
            Value::Int(i) => {
                self.int = self
                    .int
                    .checked_add(*i)
                    .ok_or_else(|| integer_overflow(self.operation))?;
            }
            Value::Float(x) => {
                if !self.is_float {
                    self.is_float = true;
                    self.float = int_to_float(self.int);
                }
                self.float += x;
            }
            other => {
                return Err(invalid_type(format!(
                    "{}() requires numeric items, got {}",
                    self.operation,
                    other.type_tag()
                )))
            }
        }
        self.count += 1;
        Ok(())
    }

    pub(crate) fn total(&self) -> Value {
        if self.is_float {
            Value::Float(self.float)
        } else {
            Value::Int(self.int)
        }
    }

    /// Mean as a `Float`, or null when nothing was added.
    #[expect(
        clippy::cast_precision_loss,
        reason = "element counts stay far below 2^52"
    )]
    pub(crate) fn average(&self) -> Value {
        if self.count == 0 {
            return Value::Null;
        }
        let total = if self.is_float {
            self.float
        } else {
            int_to_float(self.int)
        };
        Value::Float(total / self.count as f64)
    }
}

/// `select e`: the mapped value is computed once per advance.
struct Select {
    inner: Box<dyn Cursor>,
    context: Rc<StageContext>,
    expr: Rc<Expr>,
    value: Option<Value>,
}

impl Cursor for Select {
    fn current(&self, _: &mut Interpreter) -> EvalResult {
        self.value.clone().ok_or_else(iterator_not_advanced)
    }

    fn advance(&mut self, interpreter: &mut Interpreter) -> Result<bool, EvalError> {
        self.value = None;
        if !self.inner.advance(interpreter)? {
            return Ok(false);
        }
        let element = self.inner.current(interpreter)?;
        self.value = Some(self.context.evaluate(interpreter, &self.expr, element)?);
        Ok(true)
    }

    fn rewind(&mut self) {
        self.value = None;
        self.inner.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        self.value = None;
        self.inner.delete()
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(Select {
            inner: self.inner.fork()?,
            context: Rc::clone(&self.context),
            expr: Rc::clone(&self.expr),
            value: None,
        }))
    }
}

/// `where e`: skips elements whose predicate is falsy.
struct Where {
    inner: Box<dyn Cursor>,
    context: Rc<StageContext>,
    predicate: Rc<Expr>,
}

impl Cursor for Where {
    fn current(&self, interpreter: &mut Interpreter) -> EvalResult {
        self.inner.current(interpreter)
    }

    fn advance(&mut self, interpreter: &mut Interpreter) -> Result<bool, EvalError> {
        while self.inner.advance(interpreter)? {
            let element = self.inner.current(interpreter)?;
            if self
                .context
                .evaluate(interpreter, &self.predicate, element)?
                .is_truthy()
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn rewind(&mut self) {
        self.inner.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        self.inner.delete()
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(Where {
            inner: self.inner.fork()?,
            context: Rc::clone(&self.context),
            predicate: Rc::clone(&self.predicate),
        }))
    }
}

/// `distinct`: skips elements equal to one already yielded.
struct Distinct {
    inner: Box<dyn Cursor>,
    /// Yielded elements bucketed by hash.
    seen: FxHashMap<i64, Vec<Value>>,
}

impl Cursor for Distinct {
    fn current(&self, interpreter: &mut Interpreter) -> EvalResult {
        self.inner.current(interpreter)
    }

    fn advance(&mut self, interpreter: &mut Interpreter) -> Result<bool, EvalError> {
        while self.inner.advance(interpreter)? {
            let element = self.inner.current(interpreter)?;
            let bucket = self.seen.entry(element.hash_code()).or_default();
            if !bucket.contains(&element) {
                bucket.push(element);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn rewind(&mut self) {
        self.seen.clear();
        self.inner.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        self.inner.delete()
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(Distinct {
            inner: self.inner.fork()?,
            seen: FxHashMap::default(),
        }))
    }
}

/// `drop n`: skips the first `n` elements on the first advance.
struct Skip {
    inner: Box<dyn Cursor>,
    count: usize,
    started: bool,
}

impl Cursor for Skip {
    fn current(&self, interpreter: &mut Interpreter) -> EvalResult {
        self.inner.current(interpreter)
    }

    fn advance(&mut self, interpreter: &mut Interpreter) -> Result<bool, EvalError> {
        if !self.started {
            self.started = true;
            for _ in 0..self.count {
                if !self.inner.advance(interpreter)? {
                    return Ok(false);
                }
            }
        }
        self.inner.advance(interpreter)
    }

    fn rewind(&mut self) {
        self.started = false;
        self.inner.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        self.inner.delete()
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(Skip {
            inner: self.inner.fork()?,
            count: self.count,
            started: false,
        }))
    }
}

/// `take n`: stops after `n` elements without advancing the source further.
struct Take {
    inner: Box<dyn Cursor>,
    count: usize,
    taken: usize,
    exhausted: bool,
}

impl Cursor for Take {
    fn current(&self, interpreter: &mut Interpreter) -> EvalResult {
        if self.exhausted || self.taken == 0 {
            return Err(iterator_not_advanced());
        }
        self.inner.current(interpreter)
    }

    fn advance(&mut self, interpreter: &mut Interpreter) -> Result<bool, EvalError> {
        if self.exhausted || self.taken >= self.count {
            self.exhausted = true;
            return Ok(false);
        }
        let more = self.inner.advance(interpreter)?;
        if more {
            self.taken += 1;
        } else {
            self.exhausted = true;
        }
        Ok(more)
    }

    fn rewind(&mut self) {
        self.taken = 0;
        self.exhausted = false;
        self.inner.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        if self.exhausted {
            return Err(iterator_not_advanced());
        }
        self.inner.delete()
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(Take {
            inner: self.inner.fork()?,
            count: self.count,
            taken: 0,
            exhausted: false,
        }))
    }
}

#[cfg(test)]
mod tests;
