//! Per-type method lookup.

use rustc_hash::FxHashMap;

use crate::methods::{common_methods, type_methods, Method};
use crate::value::TypeTag;

type MethodTable = FxHashMap<&'static str, &'static Method>;

/// Method tables of every type, indexed once from the static registration
/// slices.
///
/// Lookups consult the receiver type's own table first, then the methods
/// shared by every value. The registry is immutable after construction and
/// shared through an `Rc` by the interpreter.
pub struct TypeRegistry {
    tables: Vec<MethodTable>,
    common: MethodTable,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let tables = TypeTag::ALL
            .iter()
            .map(|tag| {
                let mut table = MethodTable::default();
                // Earlier slices are more specific; keep their entries.
                for slice in type_methods(*tag) {
                    for method in *slice {
                        table.entry(method.name).or_insert(method);
                    }
                }
                table
            })
            .collect();
        let common = common_methods()
            .iter()
            .map(|method| (method.name, method))
            .collect();
        TypeRegistry { tables, common }
    }

    pub fn lookup(&self, tag: TypeTag, name: &str) -> Option<&'static Method> {
        self.tables
            .get(tag.index())
            .and_then(|table| table.get(name))
            .or_else(|| self.common.get(name))
            .copied()
    }

    pub fn has_method(&self, tag: TypeTag, name: &str) -> bool {
        self.lookup(tag, name).is_some()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
