//! Lexical scope frames.
//!
//! A frame maps names to values and links to its parent. Frames are shared:
//! the interpreter holds the current one, and every closure holds the frame
//! it was created in, so a frame lives as long as anything can still reach it.
//!
//! Two lookup paths exist. Resolved variables walk a fixed number of parent
//! links (`get_at`/`assign_at`); the distance comes from the resolver.
//! Dynamic variables, read inside query stages, walk by name (`lookup`).

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use specie_ir::Name;

use crate::value::Value;

/// A single-threaded, reference-counted scope handle.
///
/// Wraps `Rc<RefCell<T>>` so that scope allocations go through
/// [`LocalScope::new`]. `#[repr(transparent)]` keeps the layout identical to
/// the wrapped `Rc`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Handle to a scope frame.
pub type Env = LocalScope<Scope>;

/// A single frame of variable bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Env>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: Env) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this frame, replacing any earlier binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// This frame only.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Walk the chain by name.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Overwrite the nearest binding of `name`. Returns `false` when no frame
    /// in the chain binds it.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Overwrite `name` in this frame only.
    fn assign_here(&mut self, name: &str, value: Value) -> bool {
        match self.bindings.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.bindings.keys().map(Name::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("bindings", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl LocalScope<Scope> {
    /// A fresh frame whose parent is `self`.
    pub fn child(&self) -> Env {
        LocalScope::new(Scope::with_parent(self.clone()))
    }

    /// The frame `distance` parent links up, or `None` past the root.
    pub fn ancestor(&self, distance: usize) -> Option<Env> {
        let mut env = self.clone();
        for _ in 0..distance {
            let parent = env.borrow().parent.clone()?;
            env = parent;
        }
        Some(env)
    }

    /// Read `name` from the frame exactly `distance` links up.
    ///
    /// The frame itself must exist; the binding may not, when the
    /// declaration that introduces it was skipped at runtime.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        let env = self.ancestor(distance);
        debug_assert!(env.is_some(), "no frame at distance {distance} for '{name}'");
        let env = env?;
        let value = env.borrow().get(name);
        value
    }

    /// Overwrite `name` in the frame exactly `distance` links up.
    pub fn assign_at(&self, distance: usize, name: &str, value: Value) -> bool {
        let env = self.ancestor(distance);
        debug_assert!(env.is_some(), "no frame at distance {distance} for '{name}'");
        match env {
            Some(env) => {
                let assigned = env.borrow_mut().assign_here(name, value);
                assigned
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests;
