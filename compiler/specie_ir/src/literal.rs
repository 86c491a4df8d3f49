//! Literal payloads.
//!
//! Literals are produced by the lexer, wrapped in `Rc` by the parser and
//! deduplicated by the interning pass. Floats compare by bit pattern so
//! that `Literal` can implement `Eq` and `Hash`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use bitflags::bitflags;
use chrono::NaiveDate;

bitflags! {
    /// Flags accepted after the closing slash of a regex literal.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct RegexFlags: u8 {
        /// `i`: case-insensitive matching.
        const CASE_INSENSITIVE = 0b001;
        /// `m`: `^` and `$` match at line boundaries.
        const MULTI_LINE = 0b010;
        /// `s`: `.` matches newlines.
        const DOT_MATCHES_NEWLINE = 0b100;
    }
}

impl RegexFlags {
    /// Parse a flag string such as `"im"`. Returns the first unknown flag
    /// character on failure.
    pub fn parse(flags: &str) -> Result<Self, char> {
        flags.chars().try_fold(RegexFlags::empty(), |acc, c| {
            let flag = match c {
                'i' | 'I' => RegexFlags::CASE_INSENSITIVE,
                'm' | 'M' => RegexFlags::MULTI_LINE,
                's' | 'S' => RegexFlags::DOT_MATCHES_NEWLINE,
                other => return Err(other),
            };
            Ok(acc | flag)
        })
    }
}

impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(RegexFlags::CASE_INSENSITIVE) {
            f.write_str("i")?;
        }
        if self.contains(RegexFlags::MULTI_LINE) {
            f.write_str("m")?;
        }
        if self.contains(RegexFlags::DOT_MATCHES_NEWLINE) {
            f.write_str("s")?;
        }
        Ok(())
    }
}

/// A compiled regex literal.
///
/// Equality and hashing consider the source pattern and flags only; the
/// compiled automaton is derived data.
#[derive(Clone)]
pub struct RegexLiteral {
    pub pattern: Rc<str>,
    pub flags: RegexFlags,
    pub compiled: regex::Regex,
}

impl RegexLiteral {
    /// Compile `pattern` with `flags`.
    pub fn compile(pattern: &str, flags: RegexFlags) -> Result<Self, regex::Error> {
        let compiled = regex::RegexBuilder::new(pattern)
            .case_insensitive(flags.contains(RegexFlags::CASE_INSENSITIVE))
            .multi_line(flags.contains(RegexFlags::MULTI_LINE))
            .dot_matches_new_line(flags.contains(RegexFlags::DOT_MATCHES_NEWLINE))
            .build()?;
        Ok(RegexLiteral {
            pattern: Rc::from(pattern),
            flags,
            compiled,
        })
    }
}

impl PartialEq for RegexLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.flags == other.flags
    }
}

impl Eq for RegexLiteral {}

impl Hash for RegexLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
        self.flags.hash(state);
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

impl fmt::Debug for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex({self})")
    }
}

/// Payload of a literal token or `ExprKind::Literal` node.
#[derive(Clone, Debug)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Rc<str>),
    Regex(RegexLiteral),
    Date(NaiveDate),
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Regex(a), Literal::Regex(b)) => a == b,
            (Literal::Date(a), Literal::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Literal::Bool(b) => b.hash(state),
            Literal::Int(i) => i.hash(state),
            Literal::Float(f) => f.to_bits().hash(state),
            Literal::String(s) => s.hash(state),
            Literal::Regex(r) => r.hash(state),
            Literal::Date(d) => d.hash(state),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::String(s) => write!(f, "{s}"),
            Literal::Regex(r) => write!(f, "{r}"),
            Literal::Date(d) => write!(f, "{d}"),
        }
    }
}
