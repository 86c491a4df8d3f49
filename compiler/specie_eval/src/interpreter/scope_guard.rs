//! RAII guards for the interpreter's current frame.
//!
//! [`ScopedInterpreter`] swaps a frame (and optionally a resolution table)
//! into the interpreter and restores the previous ones when dropped, so an
//! early return through `?` or a panic unwinding through the evaluator never
//! leaves the interpreter pointing at a dead frame.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! everything callable on the interpreter is callable on the guard.
//!
//! ```text
//! let frame = interpreter.env.child();
//! frame.borrow_mut().define(name, value);
//! let mut scoped = interpreter.scoped_env(frame);
//! scoped.evaluate(body)?;
//! // previous frame restored here
//! ```

use std::mem;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use super::Interpreter;
use crate::environment::Env;
use crate::resolve::Resolutions;

pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    saved_env: Env,
    saved_resolutions: Option<Rc<Resolutions>>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        mem::swap(&mut self.interpreter.env, &mut self.saved_env);
        if let Some(resolutions) = self.saved_resolutions.take() {
            self.interpreter.resolutions = resolutions;
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Make `env` the current frame until the guard drops.
    pub fn scoped_env(&mut self, env: Env) -> ScopedInterpreter<'_> {
        let saved_env = mem::replace(&mut self.env, env);
        ScopedInterpreter {
            interpreter: self,
            saved_env,
            saved_resolutions: None,
        }
    }

    /// Make `env` the current frame and `resolutions` the table in effect
    /// until the guard drops. Used when entering code from another unit.
    pub fn scoped_with(&mut self, env: Env, resolutions: Rc<Resolutions>) -> ScopedInterpreter<'_> {
        let saved_env = mem::replace(&mut self.env, env);
        let saved_resolutions = Some(mem::replace(&mut self.resolutions, resolutions));
        ScopedInterpreter {
            interpreter: self,
            saved_env,
            saved_resolutions,
        }
    }

    /// Run `f` in a fresh child of the current frame.
    pub fn with_child_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let frame = self.env.child();
        let mut scoped = self.scoped_env(frame);
        f(&mut scoped)
    }
}

#[cfg(test)]
mod tests;
