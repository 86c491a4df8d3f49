//! Runtime values.
//!
//! Every value belongs to exactly one [`TypeTag`]. Scalars are stored
//! inline; containers and iterators sit behind [`Heap`], so copies of a value
//! share the same underlying data, and mutation through one copy is visible
//! through all of them.
//!
//! Heap values are created through the factory methods on `Value`
//! (`Value::list`, `Value::record`, ...). `Heap::new` is private to this
//! module tree.

mod function;
mod heap;
pub mod iterator;
mod map;
mod record;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use chrono::NaiveDate;
use rustc_hash::FxHasher;
use specie_ir::{Literal, RegexLiteral};

pub use function::{Arity, BoundMethod, FunctionValue, NativeFn, NativeFunction, ParamBinding, Parameter};
pub use heap::Heap;
pub use iterator::Cursor;
pub use map::{MapKey, MapValue};
pub use record::Record;

use iterator::{ListCursor, MapCursor, RecordCursor};

/// The concrete type of a value. Each tag owns one method table in the
/// [`TypeRegistry`](crate::TypeRegistry).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Bool,
    Int,
    Float,
    String,
    Regex,
    Date,
    List,
    Record,
    Map,
    Function,
    NativeFunction,
    BoundMethod,
    Iterator,
}

impl TypeTag {
    pub const ALL: [TypeTag; 14] = [
        TypeTag::Null,
        TypeTag::Bool,
        TypeTag::Int,
        TypeTag::Float,
        TypeTag::String,
        TypeTag::Regex,
        TypeTag::Date,
        TypeTag::List,
        TypeTag::Record,
        TypeTag::Map,
        TypeTag::Function,
        TypeTag::NativeFunction,
        TypeTag::BoundMethod,
        TypeTag::Iterator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "Null",
            TypeTag::Bool => "Bool",
            TypeTag::Int => "Int",
            TypeTag::Float => "Float",
            TypeTag::String => "String",
            TypeTag::Regex => "Regex",
            TypeTag::Date => "Date",
            TypeTag::List => "List",
            TypeTag::Record => "Record",
            TypeTag::Map => "Map",
            TypeTag::Function => "Function",
            TypeTag::NativeFunction => "NativeFunction",
            TypeTag::BoundMethod => "BoundMethod",
            TypeTag::Iterator => "Iterator",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Rc<str>),
    Regex(RegexLiteral),
    Date(NaiveDate),
    List(Heap<Vec<Value>>),
    Record(Heap<Record>),
    Map(Heap<MapValue>),
    Function(Rc<FunctionValue>),
    Native(&'static NativeFunction),
    BoundMethod(Rc<BoundMethod>),
    Iterator(Heap<Box<dyn Cursor>>),
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::String(Rc::from(text))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    pub fn record(record: Record) -> Self {
        Value::Record(Heap::new(record))
    }

    pub fn map(map: MapValue) -> Self {
        Value::Map(Heap::new(map))
    }

    pub fn iterator(cursor: Box<dyn Cursor>) -> Self {
        Value::Iterator(Heap::new(cursor))
    }

    pub fn function(function: FunctionValue) -> Self {
        Value::Function(Rc::new(function))
    }

    pub fn bound_method(method: BoundMethod) -> Self {
        Value::BoundMethod(Rc::new(method))
    }

    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(x) => Value::Float(*x),
            Literal::String(s) => Value::String(Rc::clone(s)),
            Literal::Regex(r) => Value::Regex(r.clone()),
            Literal::Date(d) => Value::Date(*d),
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::String(_) => TypeTag::String,
            Value::Regex(_) => TypeTag::Regex,
            Value::Date(_) => TypeTag::Date,
            Value::List(_) => TypeTag::List,
            Value::Record(_) => TypeTag::Record,
            Value::Map(_) => TypeTag::Map,
            Value::Function(_) => TypeTag::Function,
            Value::Native(_) => TypeTag::NativeFunction,
            Value::BoundMethod(_) => TypeTag::BoundMethod,
            Value::Iterator(_) => TypeTag::Iterator,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Record(record) => !record.borrow().is_empty(),
            Value::Map(map) => !map.borrow().is_empty(),
            Value::Regex(_)
            | Value::Date(_)
            | Value::Function(_)
            | Value::Native(_)
            | Value::BoundMethod(_)
            | Value::Iterator(_) => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_) | Value::Native(_) | Value::BoundMethod(_)
        )
    }

    /// A fresh cursor over a container, or `None` when the value cannot be
    /// iterated. Iterator values are their own cursor and are handled by the
    /// caller.
    pub fn cursor(&self) -> Option<Box<dyn Cursor>> {
        match self {
            Value::List(items) => Some(Box::new(ListCursor::new(items.clone()))),
            Value::Record(record) => Some(Box::new(RecordCursor::new(record.clone()))),
            Value::Map(map) => Some(Box::new(MapCursor::new(map.clone()))),
            _ => None,
        }
    }

    /// Structural hash, consistent with `==`.
    pub fn hash_code(&self) -> i64 {
        let mut hasher = FxHasher::default();
        self.hash_into(&mut hasher);
        i64::from_ne_bytes(hasher.finish().to_ne_bytes())
    }

    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        let class = match self {
            Value::Int(_) | Value::Float(_) => TypeTag::Int,
            other => other.type_tag(),
        };
        class.hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(_) | Value::Float(_) => NumericKey::of(self).hash(state),
            Value::String(s) => s.hash(state),
            Value::Regex(r) => r.hash(state),
            Value::Date(d) => d.hash(state),
            Value::List(items) => {
                for item in items.borrow().iter() {
                    item.hash_into(state);
                }
            }
            Value::Record(record) => {
                // Field order does not take part in equality.
                let mut combined = 0u64;
                for (name, value) in record.borrow().iter() {
                    let mut field = FxHasher::default();
                    name.hash(&mut field);
                    value.hash_into(&mut field);
                    combined ^= field.finish();
                }
                combined.hash(state);
            }
            Value::Map(map) => map.borrow().len().hash(state),
            Value::Function(f) => std::ptr::hash(Rc::as_ptr(f), state),
            Value::Native(n) => std::ptr::hash(*n, state),
            Value::BoundMethod(b) => {
                b.receiver.hash_into(state);
                b.method.name.hash(state);
            }
            Value::Iterator(cursor) => cursor.addr().hash(state),
        }
    }
}

impl Heap<Box<dyn Cursor>> {
    /// Shared handle to a cursor, as held by `Value::Iterator`.
    pub fn from_cursor(cursor: Box<dyn Cursor>) -> Self {
        Heap::new(cursor)
    }
}

/// Ints and integral floats hash alike, because `1 == 1.0`.
#[derive(Hash)]
enum NumericKey {
    Int(i64),
    Float(u64),
    Other,
}

impl NumericKey {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the round trip check rejects floats that do not fit"
    )]
    fn of(value: &Value) -> Self {
        match value {
            Value::Int(i) => NumericKey::Int(*i),
            Value::Float(x) if x.fract() == 0.0 && int_to_float(*x as i64) == *x => {
                NumericKey::Int(*x as i64)
            }
            Value::Float(x) => NumericKey::Float(x.to_bits()),
            _ => NumericKey::Other,
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed arithmetic is defined as float arithmetic"
)]
pub(crate) fn int_to_float(i: i64) -> f64 {
    i as f64
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_to_float(*a) == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => std::ptr::eq(*a, *b),
            (Value::BoundMethod(a), Value::BoundMethod(b)) => {
                a.method.name == b.method.name && a.receiver == b.receiver
            }
            (Value::Iterator(a), Value::Iterator(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => f.write_str(s),
            Value::Regex(r) => write!(f, "{r}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => write!(f, "{}", record.borrow()),
            Value::Map(map) => write!(f, "{}", map.borrow()),
            Value::Function(function) => write!(f, "<Function({})>", function.signature()),
            Value::Native(native) => write!(f, "<NativeFunction {}>", native.name),
            Value::BoundMethod(bound) => write!(
                f,
                "<BoundMethod {}.{}>",
                bound.receiver.type_tag(),
                bound.method.name
            ),
            Value::Iterator(_) => f.write_str("<Iterator>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Regex(r) => write!(f, "{r:?}"),
            Value::Date(d) => write!(f, "Date({d})"),
            Value::List(items) => f.debug_tuple("List").field(&*items.borrow()).finish(),
            Value::Record(record) => write!(f, "Record({})", record.borrow()),
            Value::Map(map) => write!(f, "{}", map.borrow()),
            _ => write!(f, "{self}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}
