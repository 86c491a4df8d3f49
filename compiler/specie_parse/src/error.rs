//! Parse error types.
//!
//! `ParseError` covers everything the grammar can reject. `SyntaxError` is
//! what the public entry points return: either a lexer error or a parse
//! error, so callers handle one type for "the text is not a program".

use std::fmt;

use specie_diagnostic::{Diagnostic, ErrorCode};
use specie_ir::{Location, Name, Token};
use specie_lexer::LexError;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Where the error was detected. `None` at the end of the input.
    pub location: Option<Location>,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected token {found}{}", expected_suffix(.expected))]
    UnexpectedToken {
        /// Kind and text of the offending token.
        found: String,
        expected: Option<&'static str>,
    },
    #[error("Unexpected end of tokens{}", expected_suffix(.expected))]
    UnexpectedEnd { expected: Option<&'static str> },
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("A keyword argument cannot be followed by a positional argument")]
    PositionalAfterKeyword,
    #[error("Required parameter '{0}' cannot follow an optional parameter")]
    RequiredAfterOptional(Name),
    #[error("Parameter '{0}' cannot follow a variadic parameter")]
    ParameterAfterVariadic(Name),
    #[error("Unknown query stage '{0}'")]
    UnknownQueryStage(Name),
    #[error("Query stage '{stage}' cannot follow the terminal stage '{terminal}'")]
    StageAfterTerminal {
        terminal: &'static str,
        stage: &'static str,
    },
    /// A `recursive` parser ran after the parser it refers to was dropped.
    #[error("Recursive parser used outside its definition")]
    Unbound,
}

fn expected_suffix(expected: &Option<&'static str>) -> String {
    expected.map(|kind| format!(", expected {kind}")).unwrap_or_default()
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, location: Option<Location>) -> Self {
        ParseError { kind, location }
    }

    #[cold]
    pub fn at(kind: ParseErrorKind, location: Location) -> Self {
        ParseError::new(kind, Some(location))
    }

    /// The token at `index` was not what the parser wanted.
    #[cold]
    pub fn unexpected(tokens: &[Token], index: usize, expected: Option<&'static str>) -> Self {
        match tokens.get(index) {
            Some(token) => ParseError::at(
                ParseErrorKind::UnexpectedToken {
                    found: describe(token),
                    expected,
                },
                token.location,
            ),
            None => ParseError::new(ParseErrorKind::UnexpectedEnd { expected }, None),
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } | ParseErrorKind::Unbound => ErrorCode::E2001,
            ParseErrorKind::UnexpectedEnd { .. } => ErrorCode::E2002,
            ParseErrorKind::InvalidAssignmentTarget => ErrorCode::E2003,
            ParseErrorKind::PositionalAfterKeyword => ErrorCode::E2004,
            ParseErrorKind::RequiredAfterOptional(_)
            | ParseErrorKind::ParameterAfterVariadic(_) => ErrorCode::E2005,
            ParseErrorKind::UnknownQueryStage(_) | ParseErrorKind::StageAfterTerminal { .. } => {
                ErrorCode::E2006
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message())
            .at_opt(self.location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{} at {location}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ParseError {}

/// `kind 'text'` without the location, for embedding in a message that
/// carries its own location.
fn describe(token: &Token) -> String {
    match &token.value {
        Some(value) => format!("{} '{value}'", token.kind.name()),
        None => token.kind.name().to_owned(),
    }
}

/// Lexer or parser rejection of a source text.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn location(&self) -> Option<Location> {
        match self {
            SyntaxError::Lex(err) => Some(err.location),
            SyntaxError::Parse(err) => err.location,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SyntaxError::Lex(err) => err.message(),
            SyntaxError::Parse(err) => err.message(),
        }
    }

    /// True when more input could complete the text, which a REPL uses to
    /// keep reading lines.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            SyntaxError::Parse(ParseError {
                kind: ParseErrorKind::UnexpectedEnd { .. },
                ..
            })
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SyntaxError::Lex(err) => err.to_diagnostic(),
            SyntaxError::Parse(err) => err.to_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests;
