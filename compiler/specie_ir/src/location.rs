//! Source locations.
//!
//! A `Location` is a zero-based (line, column) pair. It renders one-based
//! (`line 3, col 7`) and knows how to point at itself inside the source text.

use std::fmt;

/// Position of a token or node in the source text.
///
/// Ordering is lexicographic: first by line, then by column.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Location {
    /// Zero-based line index.
    pub line: u32,
    /// Zero-based column, counted in characters.
    pub col: u32,
}

impl Location {
    /// Location of the first character of a source.
    pub const START: Location = Location { line: 0, col: 0 };

    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Location { line, col }
    }

    /// Render a two-line pointer: the source line this location is on,
    /// followed by a caret under the column. Both lines are prefixed with
    /// `indent` spaces.
    ///
    /// Returns an empty string when the line does not exist in `source`.
    pub fn point(&self, source: &str, indent: usize) -> String {
        let Some(line) = source.split('\n').nth(self.line as usize) else {
            return String::new();
        };
        let line = line.strip_suffix('\r').unwrap_or(line);
        let pad = " ".repeat(indent);
        let caret_pad = " ".repeat(self.col as usize);
        format!("{pad}{line}\n{pad}{caret_pad}^")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line + 1, self.col + 1)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests;
