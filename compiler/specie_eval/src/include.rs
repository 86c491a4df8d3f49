//! Textual file inclusion.
//!
//! The interpreter never touches the filesystem itself; hosts hand it a
//! [`FileResolver`]. `include(path)` resolves `path` against the directory of
//! the file currently executing, runs it in the global frame, and fails
//! instead of recursing when the file is already being executed.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::errors::{circular_include, include_failed, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;
use crate::SpecieError;

/// File access supplied by the host.
pub trait FileResolver {
    /// The file `path` names, relative to `base` when it is relative and a
    /// base directory is known.
    fn resolve(&self, base: Option<&Path>, path: &str) -> io::Result<PathBuf>;

    fn read(&self, path: &Path) -> io::Result<String>;
}

/// `base/path` with `.` and `..` components folded away, without touching
/// the filesystem.
pub fn join_relative(base: Option<&Path>, path: &str) -> PathBuf {
    let joined = match base {
        Some(base) => base.join(path),
        None => PathBuf::from(path),
    };
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if normalized.file_name().is_some() => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Refuses every read. The default for embedded interpreters.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFileResolver;

impl FileResolver for NoFileResolver {
    fn resolve(&self, base: Option<&Path>, path: &str) -> io::Result<PathBuf> {
        Ok(join_relative(base, path))
    }

    fn read(&self, _: &Path) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file access is not available",
        ))
    }
}

/// Files held in memory, keyed by normalized path.
#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        MemoryResolver::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, source: &str) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: &str, source: &str) {
        self.files
            .insert(join_relative(None, path), source.to_owned());
    }
}

impl FileResolver for MemoryResolver {
    fn resolve(&self, base: Option<&Path>, path: &str) -> io::Result<PathBuf> {
        Ok(join_relative(base, path))
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}

/// One entry of the include stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum IncludeFrame {
    /// Input that did not come from a file: the REPL, `-e`, or an embedding.
    Main,
    File(PathBuf),
}

impl IncludeFrame {
    fn path(&self) -> Option<&Path> {
        match self {
            IncludeFrame::Main => None,
            IncludeFrame::File(path) => Some(path),
        }
    }
}

impl fmt::Display for IncludeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeFrame::Main => f.write_str("__main__"),
            IncludeFrame::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Interpreter {
    /// Execute `source` as the contents of the file at `path`, so that
    /// includes inside it resolve against its directory.
    pub fn execute_named(&mut self, path: impl Into<PathBuf>, source: &str) -> Result<Value, SpecieError> {
        self.includes.push(IncludeFrame::File(path.into()));
        let result = self.execute(source);
        self.includes.pop();
        result
    }

    /// Read `path` through the file resolver and execute it.
    pub fn execute_file(&mut self, path: &str) -> Result<Value, SpecieError> {
        let resolved = self
            .resolver
            .resolve(None, path)
            .and_then(|resolved| Ok((self.resolver.read(&resolved)?, resolved)));
        match resolved {
            Ok((source, resolved)) => self.execute_named(resolved, &source),
            Err(err) => Err(include_failed(format!("Cannot read '{path}': {err}")).into()),
        }
    }

    /// The file at the top of the include stack, if any.
    pub fn current_file(&self) -> Option<&Path> {
        self.includes.last().and_then(IncludeFrame::path)
    }

    /// `include(path)`: run another file in the global frame.
    pub(crate) fn include(&mut self, path: &str) -> EvalResult {
        let base = self.current_file().and_then(Path::parent).map(Path::to_path_buf);
        let resolved = self
            .resolver
            .resolve(base.as_deref(), path)
            .map_err(|err| include_failed(format!("Cannot include '{path}': {err}")))?;
        if self
            .includes
            .iter()
            .any(|frame| frame.path() == Some(resolved.as_path()))
        {
            return Err(circular_include(path));
        }
        let source = self
            .resolver
            .read(&resolved)
            .map_err(|err| include_failed(format!("Cannot include '{path}': {err}")))?;

        tracing::debug!(path = %resolved.display(), depth = self.includes.len(), "include");
        let shown = resolved.display().to_string();
        self.execute_named(resolved, &source)
            .map_err(|err| included_error(&shown, err))?;
        Ok(Value::Null)
    }
}

/// Errors from an included file. Their location is only meaningful inside
/// that file, so it moves into a note and the `include` call site takes its
/// place.
fn included_error(path: &str, err: SpecieError) -> EvalError {
    match err {
        SpecieError::Syntax(err) => match err.location() {
            Some(location) => include_failed(format!(
                "Syntax error in '{path}' at {location}: {}",
                err.message()
            )),
            None => include_failed(format!("Syntax error in '{path}': {}", err.message())),
        },
        SpecieError::Resolve(err) => include_failed(format!(
            "Error in '{path}' at {}: {}",
            err.location,
            err.message()
        )),
        SpecieError::Runtime(mut err) => {
            let note = match err.location.take() {
                Some(location) => format!("in '{path}' at {location}"),
                None => format!("in '{path}'"),
            };
            err.with_note(note)
        }
    }
}
