use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use super::Value;
use crate::errors::{unhashable_key, EvalError};

/// A value usable as a map key: scalars only, compared by type and value.
#[derive(Clone, Debug)]
pub struct MapKey(Value);

impl MapKey {
    pub fn new(value: Value) -> Result<Self, EvalError> {
        match value {
            Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Regex(_)
            | Value::Date(_) => Ok(MapKey(value)),
            other => Err(unhashable_key(&other)),
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a.type_tag() == b.type_tag() && a == b,
        }
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.type_tag().hash(state);
        self.0.hash_into(state);
    }
}

/// Key/value pairs iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MapValue {
    entries: FxHashMap<MapKey, Value>,
    order: Vec<MapKey>,
}

impl MapValue {
    pub fn new() -> Self {
        MapValue::default()
    }

    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: MapKey, value: Value) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|existing| existing != key);
        Some(removed)
    }

    pub fn contains(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.order.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|value| (key, value)))
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<Map: empty>");
        }
        f.write_str("<Map: ")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {value}", key.value())?;
        }
        f.write_str(">")
    }
}
