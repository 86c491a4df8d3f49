//! `InterpreterBuilder` for creating interpreters with a custom registry or
//! file access.

use std::rc::Rc;

use specie_ir::Name;

use super::Interpreter;
use crate::environment::{Env, Scope};
use crate::include::{FileResolver, IncludeFrame, NoFileResolver};
use crate::intern::LiteralInterner;
use crate::natives::NATIVES;
use crate::registry::TypeRegistry;
use crate::resolve::Resolutions;
use crate::value::Value;

/// Builder for [`Interpreter`].
///
/// Without a file resolver, `include` fails with an I/O error; hosts that
/// run files pass one in with [`file_resolver`](Self::file_resolver).
#[derive(Default)]
pub struct InterpreterBuilder {
    registry: Option<Rc<TypeRegistry>>,
    resolver: Option<Box<dyn FileResolver>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder::default()
    }

    /// Share a method registry between interpreters.
    #[must_use]
    pub fn registry(mut self, registry: Rc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn file_resolver(mut self, resolver: impl FileResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn build(self) -> Interpreter {
        let globals = Env::new(Scope::new());
        {
            let mut frame = globals.borrow_mut();
            for native in NATIVES {
                frame.define(Name::new(native.name), Value::Native(native));
            }
        }
        tracing::debug!(natives = NATIVES.len(), "interpreter ready");
        Interpreter {
            registry: self.registry.unwrap_or_default(),
            env: globals.clone(),
            globals,
            resolutions: Rc::new(Resolutions::default()),
            interner: LiteralInterner::new(),
            includes: vec![IncludeFrame::Main],
            resolver: self
                .resolver
                .unwrap_or_else(|| Box::new(NoFileResolver)),
        }
    }
}
