//! Filesystem access for `include`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use specie_eval::{join_relative, FileResolver};

/// Reads included files from disk. Relative paths resolve against the
/// directory of the including file, or the working directory at top level.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsResolver;

impl FileResolver for FsResolver {
    fn resolve(&self, base: Option<&Path>, path: &str) -> io::Result<PathBuf> {
        Ok(join_relative(base, path))
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Human-readable reason a source file could not be read.
pub fn read_failure(path: &str, err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {err}"),
    }
}
