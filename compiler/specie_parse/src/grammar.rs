//! The specie grammar, built from the combinators.
//!
//! Precedence, loosest first:
//!
//! | Level | Forms |
//! |-------|-------|
//! | declaration | `var name = expr` |
//! | assignment | `target = expr` (right-associative) |
//! | function | `(params): body` |
//! | block | `do ... end` |
//! | control | `if`, `for`, `from` |
//! | logical | `or`, `and`, `not` |
//! | equality | `== !=` (non-associative) |
//! | relational | `< <= > >= ~ =~ in` (non-associative) |
//! | additive | `+ -` |
//! | multiplicative | `* /` |
//! | unary | `-x` |
//! | postfix | calls `f(..)`, members `.name` |
//! | primary | literals, lists, records, names, `( expr )` |
//!
//! Newlines separate expressions, but are allowed after an opening bracket
//! or a comma, before a closing bracket, and around `then`/`else`.

mod forms;
mod operators;
mod primary;

use specie_ir::{Expr, ExprKind, Location, Name, Token, TokenKind};

use crate::combinator::{recursive, token, Parser};
use crate::error::ParseError;

/// The two entry points of the grammar.
pub struct Grammar {
    module: Parser<Expr>,
    expression: Parser<Expr>,
}

impl Grammar {
    pub fn new() -> Self {
        let expression = recursive(|expr| {
            let primary = primary::primary(&expr);
            let logical = operators::logical(primary, &expr);
            forms::expression(logical, &expr)
        });
        let module = expression
            .clone()
            .many_separated(newline(), 0, None)
            .map(|items| Expr::new(ExprKind::Module(items), Location::START))
            .phrase();
        Grammar {
            module,
            expression: expression.phrase(),
        }
    }

    /// Newline-separated expressions covering the whole input.
    pub fn module(&self) -> &Parser<Expr> {
        &self.module
    }

    /// One expression covering the whole input.
    pub fn expression(&self) -> &Parser<Expr> {
        &self.expression
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}

fn newline() -> Parser<Token> {
    token(TokenKind::Newline)
}

/// At most one newline (the lexer collapses runs).
fn skip_newline() -> Parser<()> {
    newline().value(()).optional(())
}

/// An opening bracket, which may be followed by a newline.
fn open(kind: TokenKind) -> Parser<Token> {
    token(kind).before(skip_newline())
}

/// A closing bracket, which may be preceded by a newline.
fn close(kind: TokenKind) -> Parser<Token> {
    skip_newline().then(token(kind))
}

fn comma() -> Parser<Token> {
    token(TokenKind::Comma).before(skip_newline())
}

/// An identifier's name and location.
fn identifier() -> Parser<(Name, Location)> {
    token(TokenKind::Identifier).try_map(|token| match token.ident() {
        Some(name) => Ok((name.clone(), token.location)),
        None => Err(malformed(&token)),
    })
}

/// A token whose kind matched but whose value is missing.
#[cold]
fn malformed(token: &Token) -> ParseError {
    ParseError::unexpected(std::slice::from_ref(token), 0, None)
}
