//! Runtime errors.
//!
//! `EvalErrorKind` names the category and carries the structured data of
//! the failure. Factory functions below are the public way to build an
//! [`EvalError`]: they are `#[cold]` so the happy path of the evaluator stays
//! compact. The evaluator attaches the location of the innermost node that
//! failed through [`EvalError::or_at`].

use std::fmt;

use specie_diagnostic::{Diagnostic, ErrorCode};
use specie_ir::{Location, Name};
use thiserror::Error;

use crate::value::{TypeTag, Value};

/// Result of evaluating a node or calling a method.
pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("{0}")]
    InvalidType(String),
    #[error("{0}")]
    InvalidValue(String),
    #[error("Unsupported operation '{operation}' for {}", operand_types(.left, .right))]
    InvalidOperation {
        operation: &'static str,
        left: TypeTag,
        right: Option<TypeTag>,
    },
    #[error("{0}")]
    InvalidCall(String),
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(Name),
    #[error("Undefined method '{method}' for type {receiver}")]
    UndefinedMethod { method: Name, receiver: TypeTag },
    #[error("Undefined field '{0}'")]
    UndefinedField(Name),
    #[error("Undefined index '{0}'")]
    UndefinedIndex(i64),
    #[error("Undefined key '{0}'")]
    UndefinedKey(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Include(String),
}

fn operand_types(left: &TypeTag, right: &Option<TypeTag>) -> String {
    match right {
        Some(right) => format!("types {left} and {right}"),
        None => format!("type {left}"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub location: Option<Location>,
    /// Secondary context, such as the included file an error came from.
    pub notes: Vec<String>,
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            location: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach `location` unless a more precise one is already set.
    #[must_use]
    pub fn or_at(mut self, location: Location) -> Self {
        self.location.get_or_insert(location);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::InvalidType(_) => ErrorCode::E4001,
            EvalErrorKind::InvalidValue(_) => ErrorCode::E4002,
            EvalErrorKind::InvalidOperation { .. } => ErrorCode::E4003,
            EvalErrorKind::InvalidCall(_) => ErrorCode::E4004,
            EvalErrorKind::UndefinedVariable(_) => ErrorCode::E4005,
            EvalErrorKind::UndefinedMethod { .. } => ErrorCode::E4006,
            EvalErrorKind::UndefinedField(_) => ErrorCode::E4007,
            EvalErrorKind::UndefinedIndex(_) => ErrorCode::E4008,
            EvalErrorKind::UndefinedKey(_) => ErrorCode::E4009,
            EvalErrorKind::InvalidState(_) => ErrorCode::E4010,
            EvalErrorKind::Include(_) => ErrorCode::E4011,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        self.notes.iter().fold(
            Diagnostic::error(self.code())
                .with_message(self.message())
                .at_opt(self.location),
            |diagnostic, note| diagnostic.with_note(note.clone()),
        )
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{} at {location}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

// Type errors

#[cold]
pub fn invalid_type(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidType(message.into()))
}

/// A method argument had the wrong type.
#[cold]
pub fn wrong_arg_type(method: &str, expected: &str, got: &Value) -> EvalError {
    invalid_type(format!(
        "{method}() expects {expected}, got {}",
        got.type_tag()
    ))
}

#[cold]
pub fn not_iterable(value: &Value) -> EvalError {
    invalid_type(format!("Value of type {} is not iterable", value.type_tag()))
}

#[cold]
pub fn unhashable_key(value: &Value) -> EvalError {
    invalid_type(format!(
        "Maps don't support unhashable keys of type {}",
        value.type_tag()
    ))
}

#[cold]
pub fn cannot_set_field(name: &Name, value: &Value) -> EvalError {
    invalid_type(format!(
        "Cannot set field '{name}' on a value of type {}",
        value.type_tag()
    ))
}

// Value errors

#[cold]
pub fn invalid_value(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidValue(message.into()))
}

#[cold]
pub fn division_by_zero() -> EvalError {
    invalid_value("Division by zero")
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    invalid_value(format!("Integer overflow in {operation}"))
}

// Operation errors

/// Neither operand type supports `operation` with the other.
#[cold]
pub fn unsupported_operands(operation: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidOperation {
        operation,
        left: left.type_tag(),
        right: Some(right.type_tag()),
    })
}

#[cold]
pub fn unsupported_operand(operation: &'static str, operand: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidOperation {
        operation,
        left: operand.type_tag(),
        right: None,
    })
}

// Call errors

#[cold]
pub fn invalid_call(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidCall(message.into()))
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    invalid_call(format!("Value of type {} is not callable", value.type_tag()))
}

#[cold]
pub fn wrong_arg_count(expected: &str, got: usize) -> EvalError {
    invalid_call(format!("Expected {expected} arguments, got {got}"))
}

#[cold]
pub fn unexpected_keyword(name: &Name) -> EvalError {
    invalid_call(format!("Unexpected keyword argument '{name}'"))
}

#[cold]
pub fn duplicate_argument(name: &Name) -> EvalError {
    invalid_call(format!("Multiple values for argument '{name}'"))
}

// Access errors

#[cold]
pub fn undefined_variable(name: &Name) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedVariable(name.clone()))
}

#[cold]
pub fn undefined_method(method: &str, receiver: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedMethod {
        method: Name::new(method),
        receiver: receiver.type_tag(),
    })
}

#[cold]
pub fn undefined_field(name: &Name) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedField(name.clone()))
}

#[cold]
pub fn undefined_index(index: i64) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedIndex(index))
}

#[cold]
pub fn undefined_key(key: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedKey(key.to_string()))
}

// State errors

#[cold]
pub fn iterator_not_advanced() -> EvalError {
    EvalError::new(EvalErrorKind::InvalidState(
        "The iterator has not yet been advanced".to_owned(),
    ))
}

#[cold]
pub fn iterator_in_use() -> EvalError {
    EvalError::new(EvalErrorKind::InvalidState(
        "The iterator is already being advanced".to_owned(),
    ))
}

// Include errors

#[cold]
pub fn include_failed(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Include(message.into()))
}

#[cold]
pub fn circular_include(path: &str) -> EvalError {
    include_failed(format!("Circular include of '{path}'"))
}

#[cfg(test)]
mod tests;
