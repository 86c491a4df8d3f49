//! Lexer errors.
//!
//! A lexer error is WHERE (`location`) plus WHAT (`kind`). The lexer stops at
//! the first error; the rest of the input is not scanned.

use specie_diagnostic::{Diagnostic, ErrorCode};
use specie_ir::Location;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} at {location}")]
pub struct LexError {
    pub location: Location,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexErrorKind {
    /// No rule matches at this position.
    #[error("Illegal character '{0}'")]
    IllegalCharacter(char),
    /// Regex literal with a flag outside `i`, `m`, `s`.
    #[error("Invalid regex flag '{0}'")]
    InvalidRegexFlag(char),
    /// Regex literal whose body does not compile.
    #[error("Invalid regex /{pattern}/: {reason}")]
    InvalidRegex { pattern: String, reason: String },
    /// Date literal that is not a real calendar date.
    #[error("Invalid date literal: {0}")]
    InvalidDate(String),
    /// Integer literal outside the 64-bit signed range.
    #[error("Integer literal '{0}' is out of range")]
    IntegerOutOfRange(String),
    /// Float literal that does not parse.
    #[error("Invalid float literal '{0}'")]
    InvalidFloat(String),
    /// A rule pattern in the lexer's own table does not compile.
    #[error("Invalid lexer rule {rule}: {reason}")]
    InvalidRule { rule: String, reason: String },
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, location: Location) -> Self {
        LexError { location, kind }
    }

    /// Error message without the location suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::IllegalCharacter(_) | LexErrorKind::InvalidRule { .. } => {
                ErrorCode::E1001
            }
            _ => ErrorCode::E1002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message())
            .at(self.location)
    }
}
