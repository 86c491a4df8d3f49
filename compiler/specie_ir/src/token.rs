//! Tokens produced by the lexer.

use std::fmt;
use std::ops::Range;

use crate::{Literal, Location, Name};

/// Token kinds of the specie language.
///
/// The declaration order here has no meaning; the lexer's rule table decides
/// which kind wins when two patterns match the same text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Newline,
    Whitespace,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,

    Arrow,
    Comma,
    Colon,
    Dot,
    Ellipsis,

    Plus,
    Minus,
    Star,
    Slash,
    EqEq,
    NotEq,
    Tilde,
    TildeMatch,
    LtEq,
    Lt,
    GtEq,
    Gt,
    Assign,

    And,
    Or,
    Not,
    In,
    Do,
    End,
    If,
    Then,
    Else,
    For,
    From,
    Var,

    True,
    False,
    String,
    Regex,
    Date,
    Int,
    Float,

    Identifier,
}

impl TokenKind {
    /// Stable snake-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LeftParen => "parenthesis_left",
            TokenKind::RightParen => "parenthesis_right",
            TokenKind::LeftBracket => "square_bracket_left",
            TokenKind::RightBracket => "square_bracket_right",
            TokenKind::LeftBrace => "curly_bracket_left",
            TokenKind::RightBrace => "curly_bracket_right",
            TokenKind::Arrow => "symbol_arrow",
            TokenKind::Comma => "symbol_comma",
            TokenKind::Colon => "symbol_colon",
            TokenKind::Dot => "symbol_dot",
            TokenKind::Ellipsis => "symbol_ellipsis",
            TokenKind::Plus => "operator_add",
            TokenKind::Minus => "operator_sub",
            TokenKind::Star => "operator_mul",
            TokenKind::Slash => "operator_div",
            TokenKind::EqEq => "operator_eq",
            TokenKind::NotEq => "operator_neq",
            TokenKind::Tilde | TokenKind::TildeMatch => "operator_match",
            TokenKind::LtEq => "operator_lte",
            TokenKind::Lt => "operator_lt",
            TokenKind::GtEq => "operator_gte",
            TokenKind::Gt => "operator_gt",
            TokenKind::Assign => "operator_assign",
            TokenKind::And => "operator_and",
            TokenKind::Or => "operator_or",
            TokenKind::Not => "operator_not",
            TokenKind::In => "operator_in",
            TokenKind::Do => "keyword_do",
            TokenKind::End => "keyword_end",
            TokenKind::If => "keyword_if",
            TokenKind::Then => "keyword_then",
            TokenKind::Else => "keyword_else",
            TokenKind::For => "keyword_for",
            TokenKind::From => "keyword_from",
            TokenKind::Var => "keyword_var",
            TokenKind::True => "literal_true",
            TokenKind::False => "literal_false",
            TokenKind::String => "literal_string",
            TokenKind::Regex => "literal_regex",
            TokenKind::Date => "literal_date",
            TokenKind::Int => "literal_int",
            TokenKind::Float => "literal_float",
            TokenKind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value extracted from a token's matched text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenValue {
    /// Identifier text.
    Ident(Name),
    /// Literal payload, already validated.
    Literal(Literal),
    /// Raw matched text for operators and keywords.
    Text(Name),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Ident(name) | TokenValue::Text(name) => write!(f, "{name}"),
            TokenValue::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

/// A lexeme: its kind, extracted value and where it starts.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub location: Location,
    /// Byte range of the matched text in the source.
    pub span: Range<usize>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        value: Option<TokenValue>,
        location: Location,
        span: Range<usize>,
    ) -> Self {
        Token {
            kind,
            value,
            location,
            span,
        }
    }

    /// Identifier text, if this is an identifier token.
    pub fn ident(&self) -> Option<&Name> {
        match &self.value {
            Some(TokenValue::Ident(name)) => Some(name),
            _ => None,
        }
    }

    /// Literal payload, if this is a literal token.
    pub fn literal(&self) -> Option<&Literal> {
        match &self.value {
            Some(TokenValue::Literal(lit)) => Some(lit),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} '{}' at {}", self.kind, value, self.location),
            None => write!(f, "{} at {}", self.kind, self.location),
        }
    }
}

#[cfg(test)]
mod tests;
