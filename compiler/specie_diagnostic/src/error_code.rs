//! Error codes for all diagnostics.
//!
//! The first digit names the phase:
//! - E1xxx: lexer
//! - E2xxx: parser
//! - E3xxx: resolver
//! - E4xxx: runtime

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer (E1xxx)
    /// No rule matches the input
    E1001,
    /// Malformed literal (regex flags, date, integer range)
    E1002,

    // Parser (E2xxx)
    /// Unexpected token
    E2001,
    /// Unexpected end of input
    E2002,
    /// Invalid assignment target
    E2003,
    /// Positional argument after keyword argument
    E2004,
    /// Invalid parameter order
    E2005,
    /// Unknown query stage
    E2006,

    // Resolver (E3xxx)
    /// Local variable read in its own initializer
    E3001,
    /// Variable declared twice in one scope
    E3002,

    // Runtime (E4xxx)
    /// Invalid type
    E4001,
    /// Invalid value
    E4002,
    /// Unsupported operation for the operand types
    E4003,
    /// Invalid call (not callable, arity, keyword mismatch)
    E4004,
    /// Undefined variable
    E4005,
    /// Undefined method
    E4006,
    /// Undefined field
    E4007,
    /// Undefined index
    E4008,
    /// Undefined key
    E4009,
    /// Iterator used in an invalid state
    E4010,
    /// File inclusion failed
    E4011,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4007 => "E4007",
            ErrorCode::E4008 => "E4008",
            ErrorCode::E4009 => "E4009",
            ErrorCode::E4010 => "E4010",
            ErrorCode::E4011 => "E4011",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
