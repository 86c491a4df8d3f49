//! specie - command-line driver for the specie language.
//!
//! The binary is a thin shell around [`specie_eval::Interpreter`]:
//! - [`args`]: `specie [OPTIONS] [FILE]`
//! - [`driver`]: runs files and expressions, renders failures as diagnostics
//! - [`repl`]: the interactive session
//! - [`fs`]: the filesystem-backed `include` resolver
//!
//! The interpreter itself never touches the filesystem; this crate hands it
//! an [`FsResolver`].

pub mod args;
pub mod driver;
pub mod fs;
mod logging;
pub mod repl;

pub use args::{parse_args, usage, Action, ArgError, Options};
pub use driver::{run, Driver, Reported};
pub use fs::FsResolver;
pub use logging::init_tracing;
