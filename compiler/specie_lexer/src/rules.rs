//! The specie rule table.
//!
//! Order matters only for equal-length matches: keywords are listed before
//! `identifier` so `if` lexes as a keyword while `iffy` is an identifier.

use std::rc::Rc;

use chrono::NaiveDate;
use regex::Captures;
use specie_ir::{Literal, Name, RegexFlags, RegexLiteral, TokenKind, TokenValue};

use crate::comments::CommentSyntax;
use crate::{LexErrorKind, Rule};

/// Body of a double-quoted string, without the quotes.
pub const STRING_PATTERN: &str = r#""((?:[^"\\]|\\.)*)""#;

/// Comment delimiters, with string literals protected.
pub fn comment_syntax() -> CommentSyntax {
    CommentSyntax {
        block: Some(("#-".to_owned(), "-#".to_owned())),
        inline: Some("#".to_owned()),
        protect: Some(STRING_PATTERN.to_owned()),
    }
}

pub fn rules() -> Result<Vec<Rule>, LexErrorKind> {
    use TokenKind as K;

    Ok(vec![
        Rule::new(K::Whitespace, r"[ \t]+")?.ignored(),
        // Brackets
        Rule::new(K::LeftParen, r"\(")?,
        Rule::new(K::RightParen, r"\)")?,
        Rule::new(K::LeftBracket, r"\[")?,
        Rule::new(K::RightBracket, r"\]")?,
        Rule::new(K::LeftBrace, r"\{")?,
        Rule::new(K::RightBrace, r"\}")?,
        // Symbols
        Rule::new(K::Arrow, r"->")?,
        Rule::new(K::Comma, r",")?,
        Rule::new(K::Colon, r":")?,
        Rule::new(K::Dot, r"\.")?,
        Rule::new(K::Ellipsis, r"\.\.\.")?,
        // Operators
        Rule::text(K::Plus, r"\+")?,
        Rule::text(K::Minus, r"-")?,
        Rule::text(K::Star, r"\*")?,
        Rule::text(K::Slash, r"/")?,
        Rule::text(K::EqEq, r"==")?,
        Rule::text(K::NotEq, r"!=")?,
        Rule::text(K::Tilde, r"~")?,
        Rule::text(K::TildeMatch, r"=~")?,
        Rule::text(K::LtEq, r"<=")?,
        Rule::text(K::Lt, r"<")?,
        Rule::text(K::GtEq, r">=")?,
        Rule::text(K::Gt, r">")?,
        Rule::text(K::Assign, r"=")?,
        Rule::text(K::And, r"and")?,
        Rule::text(K::Or, r"or")?,
        Rule::text(K::Not, r"not")?,
        Rule::text(K::In, r"in")?,
        // Keywords
        Rule::new(K::Do, r"do")?,
        Rule::new(K::End, r"end")?,
        Rule::new(K::If, r"if")?,
        Rule::new(K::Then, r"then")?,
        Rule::new(K::Else, r"else")?,
        Rule::new(K::For, r"for")?,
        Rule::new(K::From, r"from")?,
        Rule::new(K::Var, r"var")?,
        // Literals
        Rule::with_extract(K::True, r"true", |_| Ok(Some(literal(Literal::Bool(true)))))?,
        Rule::with_extract(K::False, r"false", |_| Ok(Some(literal(Literal::Bool(false)))))?,
        Rule::with_extract(K::String, STRING_PATTERN, extract_string)?,
        Rule::with_extract(
            K::Regex,
            r"/((?:[^/\\\s]|\\.)(?:[^/\\\r\n]|\\.)*)/([A-Za-z]*)",
            extract_regex,
        )?,
        Rule::with_extract(K::Date, r"\d{4}-\d{2}-\d{2}", extract_date)?,
        Rule::with_extract(K::Int, r"-?(?:0|[1-9][0-9]*)", extract_int)?,
        Rule::with_extract(K::Float, r"-?(?:0|[1-9][0-9]*)\.[0-9]+", extract_float)?,
        // Names
        Rule::with_extract(K::Identifier, r"[A-Za-z_][A-Za-z0-9_]*", |caps| {
            Ok(Some(TokenValue::Ident(Name::new(&caps[0]))))
        })?,
    ])
}

fn literal(lit: Literal) -> TokenValue {
    TokenValue::Literal(lit)
}

/// Decode backslash escapes. Unknown escapes keep the escaped character.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn extract_string(caps: &Captures<'_>) -> Result<Option<TokenValue>, LexErrorKind> {
    let body = unescape(&caps[1]);
    Ok(Some(literal(Literal::String(Rc::from(body)))))
}

fn extract_regex(caps: &Captures<'_>) -> Result<Option<TokenValue>, LexErrorKind> {
    let pattern = caps[1].replace(r"\/", "/");
    let flags = RegexFlags::parse(&caps[2]).map_err(LexErrorKind::InvalidRegexFlag)?;
    let regex = RegexLiteral::compile(&pattern, flags).map_err(|err| LexErrorKind::InvalidRegex {
        pattern: pattern.clone(),
        reason: err.to_string(),
    })?;
    Ok(Some(literal(Literal::Regex(regex))))
}

fn extract_date(caps: &Captures<'_>) -> Result<Option<TokenValue>, LexErrorKind> {
    let date = NaiveDate::parse_from_str(&caps[0], "%Y-%m-%d")
        .map_err(|err| LexErrorKind::InvalidDate(format!("{}: {err}", &caps[0])))?;
    Ok(Some(literal(Literal::Date(date))))
}

fn extract_int(caps: &Captures<'_>) -> Result<Option<TokenValue>, LexErrorKind> {
    let text = &caps[0];
    let value = text
        .parse::<i64>()
        .map_err(|_| LexErrorKind::IntegerOutOfRange(text.to_owned()))?;
    Ok(Some(literal(Literal::Int(value))))
}

fn extract_float(caps: &Captures<'_>) -> Result<Option<TokenValue>, LexErrorKind> {
    let text = &caps[0];
    let value = text
        .parse::<f64>()
        .map_err(|_| LexErrorKind::InvalidFloat(text.to_owned()))?;
    Ok(Some(literal(Literal::Float(value))))
}
