//! Specie Eval - resolver, object model and evaluator for specie.
//!
//! # Architecture
//!
//! A program goes through three passes before it produces a value:
//! - [`intern`]: structurally equal literals share one payload
//! - [`resolve`]: every local variable occurrence gets its scope distance
//! - [`interpreter`]: a tree walk over the AST and the resolution table
//!
//! Values live in [`value`]. Their behavior is a set of capability methods
//! per [`TypeTag`], registered in static tables (`methods`) and looked up
//! through the [`TypeRegistry`]. Operators are sugar for those methods.
//! Queries (`from v in xs where ...`) are cursor decorators, see `query`.
//!
//! # Embedding
//!
//! ```text
//! let mut interpreter = Interpreter::new();
//! let value = interpreter.execute("1 + 2 * 3")?;
//! ```
//!
//! Every `execute` call runs in the same global frame, so declarations carry
//! over between inputs. Errors abort one input only.

mod environment;
pub mod errors;
mod include;
pub mod intern;
pub mod interpreter;
mod methods;
mod natives;
mod query;
pub mod registry;
pub mod resolve;
pub mod value;

use specie_diagnostic::Diagnostic;
use specie_ir::Location;
use specie_parse::SyntaxError;
use thiserror::Error;

pub use environment::{Env, LocalScope, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use include::{join_relative, FileResolver, MemoryResolver, NoFileResolver};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use methods::{Method, MethodFn};
pub use registry::TypeRegistry;
pub use resolve::{resolve, Resolution, ResolveError, ResolveErrorKind, Resolutions};
pub use value::{TypeTag, Value};

/// Any failure of [`Interpreter::execute`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpecieError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

impl SpecieError {
    pub fn location(&self) -> Option<Location> {
        match self {
            SpecieError::Syntax(err) => err.location(),
            SpecieError::Resolve(err) => Some(err.location),
            SpecieError::Runtime(err) => err.location,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SpecieError::Syntax(err) => err.message(),
            SpecieError::Resolve(err) => err.message(),
            SpecieError::Runtime(err) => err.message(),
        }
    }

    /// More input could complete the source; see
    /// [`SyntaxError::is_incomplete`].
    pub fn is_incomplete(&self) -> bool {
        matches!(self, SpecieError::Syntax(err) if err.is_incomplete())
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SpecieError::Syntax(err) => err.to_diagnostic(),
            SpecieError::Resolve(err) => err.to_diagnostic(),
            SpecieError::Runtime(err) => err.to_diagnostic(),
        }
    }
}
