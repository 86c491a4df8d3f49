//! Diagnostic system for specie.
//!
//! Every phase reports failures as a `(message, Location)` pair. This crate
//! turns those into a [`Diagnostic`] with an [`ErrorCode`] and renders it
//! against the source text:
//!
//! ```text
//! error[E2001]: Unexpected token operator_mul '*'
//!   --> line 1, col 5
//!   1 * * 2
//!       ^
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
