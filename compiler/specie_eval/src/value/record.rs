use std::fmt;

use specie_ir::Name;

use super::Value;

/// Named fields in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Record {
    fields: Vec<(Name, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    pub fn from_fields(fields: impl IntoIterator<Item = (Name, Value)>) -> Self {
        let mut record = Record::new();
        for (name, value) in fields {
            record.set(name, value);
        }
        record
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|i| &self.fields[i].1)
    }

    /// Overwrite an existing field in place, or append a new one.
    pub fn set(&mut self, name: Name, value: Value) {
        match self.position(name.as_str()) {
            Some(i) => self.fields[i].1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.position(name).map(|i| self.fields.remove(i).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }

    pub(crate) fn field_at(&self, index: usize) -> Option<(&Name, &Value)> {
        self.fields.get(index).map(|(name, value)| (name, value))
    }

    pub(crate) fn remove_at(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field.as_str() == name)
    }
}

/// Equal when both hold the same fields with equal values, in any order.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name.as_str()) == Some(value))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}
