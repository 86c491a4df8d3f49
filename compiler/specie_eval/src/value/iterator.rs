//! The iteration protocol.
//!
//! A [`Cursor`] is an explicit position over a sequence. It starts before
//! the first element; `advance` moves to the next one and reports whether it
//! exists. `current` is only valid after a successful `advance`.
//!
//! `delete` removes the element under the cursor from the underlying
//! container. The following `advance` then lands on the element that slid
//! into its place instead of skipping it.
//!
//! Query stages wrap cursors in decorators (see `crate::query`), which is
//! why `current` and `advance` receive the interpreter: a decorator may need
//! to evaluate a stage expression.
//!
//! `fork` starts an independent cursor over the same source. Full
//! traversals (`for`, queries, `list`, `toList`) run on a fork, so nesting
//! two traversals of one `Iterator` value gives each its own position, and
//! only `advance`/`rewind` called on the value move the shared one.

use specie_ir::Name;

use super::{Heap, MapKey, MapValue, Record, Value};
use crate::errors::{iterator_not_advanced, undefined_key, EvalError, EvalResult};
use crate::interpreter::Interpreter;

pub trait Cursor {
    fn current(&self, interpreter: &mut Interpreter) -> EvalResult;
    fn advance(&mut self, interpreter: &mut Interpreter) -> Result<bool, EvalError>;
    fn rewind(&mut self);
    fn delete(&mut self) -> Result<(), EvalError>;
    /// A new cursor over the same source, before the first element.
    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError>;
}

/// Index bookkeeping shared by the container cursors.
#[derive(Clone, Copy, Debug, Default)]
struct Position {
    index: Option<usize>,
    /// The element at `index` was deleted; the next advance stays put.
    deleted: bool,
}

impl Position {
    fn advance(&mut self, len: usize) -> bool {
        let next = match self.index {
            None => 0,
            Some(index) if self.deleted => index,
            Some(index) => index + 1,
        };
        self.index = Some(next);
        self.deleted = false;
        next < len
    }

    fn valid(self, len: usize) -> Result<usize, EvalError> {
        match self.index {
            Some(index) if !self.deleted && index < len => Ok(index),
            _ => Err(iterator_not_advanced()),
        }
    }

    fn rewind(&mut self) {
        *self = Position::default();
    }
}

/// `{key: ..., value: ...}`, the element shape of record and map iteration.
fn entry(key: Value, value: Value) -> Value {
    Value::record(Record::from_fields([
        (Name::new("key"), key),
        (Name::new("value"), value),
    ]))
}

pub struct ListCursor {
    items: Heap<Vec<Value>>,
    position: Position,
}

impl ListCursor {
    pub fn new(items: Heap<Vec<Value>>) -> Self {
        ListCursor {
            items,
            position: Position::default(),
        }
    }
}

impl Cursor for ListCursor {
    fn current(&self, _: &mut Interpreter) -> EvalResult {
        let items = self.items.borrow();
        let index = self.position.valid(items.len())?;
        Ok(items[index].clone())
    }

    fn advance(&mut self, _: &mut Interpreter) -> Result<bool, EvalError> {
        Ok(self.position.advance(self.items.borrow().len()))
    }

    fn rewind(&mut self) {
        self.position.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        let mut items = self.items.borrow_mut();
        let index = self.position.valid(items.len())?;
        items.remove(index);
        self.position.deleted = true;
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(ListCursor::new(self.items.clone())))
    }
}

pub struct RecordCursor {
    record: Heap<Record>,
    position: Position,
}

impl RecordCursor {
    pub fn new(record: Heap<Record>) -> Self {
        RecordCursor {
            record,
            position: Position::default(),
        }
    }
}

impl Cursor for RecordCursor {
    fn current(&self, _: &mut Interpreter) -> EvalResult {
        let record = self.record.borrow();
        let index = self.position.valid(record.len())?;
        let (name, value) = record.field_at(index).ok_or_else(iterator_not_advanced)?;
        Ok(entry(Value::string(name.as_str()), value.clone()))
    }

    fn advance(&mut self, _: &mut Interpreter) -> Result<bool, EvalError> {
        Ok(self.position.advance(self.record.borrow().len()))
    }

    fn rewind(&mut self) {
        self.position.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        let mut record = self.record.borrow_mut();
        let index = self.position.valid(record.len())?;
        record.remove_at(index);
        self.position.deleted = true;
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(RecordCursor::new(self.record.clone())))
    }
}

/// Iterates over a snapshot of the keys taken when the cursor is created or
/// rewound, reading values from the live map.
pub struct MapCursor {
    map: Heap<MapValue>,
    keys: Vec<MapKey>,
    position: Position,
}

impl MapCursor {
    pub fn new(map: Heap<MapValue>) -> Self {
        let keys = map.borrow().keys().cloned().collect();
        MapCursor {
            map,
            keys,
            position: Position::default(),
        }
    }
}

impl Cursor for MapCursor {
    fn current(&self, _: &mut Interpreter) -> EvalResult {
        let index = self.position.valid(self.keys.len())?;
        let key = &self.keys[index];
        let value = self
            .map
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| undefined_key(key.value()))?;
        Ok(entry(key.value().clone(), value))
    }

    fn advance(&mut self, _: &mut Interpreter) -> Result<bool, EvalError> {
        Ok(self.position.advance(self.keys.len()))
    }

    fn rewind(&mut self) {
        self.keys = self.map.borrow().keys().cloned().collect();
        self.position.rewind();
    }

    fn delete(&mut self) -> Result<(), EvalError> {
        let index = self.position.valid(self.keys.len())?;
        let key = self.keys.remove(index);
        self.map.borrow_mut().remove(&key);
        self.position.deleted = true;
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Cursor>, EvalError> {
        Ok(Box::new(MapCursor::new(self.map.clone())))
    }
}
