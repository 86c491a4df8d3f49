//! Primary expressions: literals, lists, records, names and groupings.

use std::rc::Rc;

use specie_ir::{Expr, ExprKind, Name, TokenKind};

use super::{close, comma, identifier, malformed, open};
use crate::combinator::{alternate, concat, token, Parser};

pub(super) fn primary(expr: &Parser<Expr>) -> Parser<Expr> {
    alternate(vec![
        literal(),
        list(expr),
        record(expr),
        variable(),
        grouping(expr),
    ])
}

const LITERAL_KINDS: [TokenKind; 7] = [
    TokenKind::True,
    TokenKind::False,
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::String,
    TokenKind::Regex,
    TokenKind::Date,
];

fn literal() -> Parser<Expr> {
    alternate(LITERAL_KINDS.into_iter().map(token).collect()).try_map(|token| {
        match token.literal() {
            Some(literal) => Ok(Expr::new(
                ExprKind::Literal(Rc::new(literal.clone())),
                token.location,
            )),
            None => Err(malformed(&token)),
        }
    })
}

fn list(expr: &Parser<Expr>) -> Parser<Expr> {
    let items = expr
        .clone()
        .many_separated_optionally_terminated(comma(), 0, None);
    concat(
        open(TokenKind::LeftBracket),
        items.before(close(TokenKind::RightBracket)),
        |bracket, items| Expr::new(ExprKind::List(items), bracket.location),
    )
}

/// `name: expr`, shared by records and keyword arguments.
pub(super) fn field(expr: &Parser<Expr>) -> Parser<(Name, Expr)> {
    concat(
        identifier(),
        token(TokenKind::Colon).then(expr.clone()),
        |(name, _), value| (name, value),
    )
}

fn record(expr: &Parser<Expr>) -> Parser<Expr> {
    let fields = field(expr).many_separated_optionally_terminated(comma(), 0, None);
    concat(
        open(TokenKind::LeftBrace),
        fields.before(close(TokenKind::RightBrace)),
        |brace, fields| Expr::new(ExprKind::Record(fields), brace.location),
    )
}

fn variable() -> Parser<Expr> {
    identifier().map(|(name, location)| Expr::new(ExprKind::Variable(name), location))
}

fn grouping(expr: &Parser<Expr>) -> Parser<Expr> {
    concat(
        open(TokenKind::LeftParen),
        expr.clone().before(close(TokenKind::RightParen)),
        |paren, inner| Expr::new(ExprKind::Grouping(Box::new(inner)), paren.location),
    )
}
