//! Postfix chains and the operator levels, up to logical `or`.

use specie_ir::{BinaryOp, Expr, ExprKind, Location, LogicalOp, Name, TokenKind, UnaryOp};

use super::primary::field;
use super::{close, comma, identifier, open, skip_newline};
use crate::combinator::{alternate, concat, recursive, reduce, token, Parser};
use crate::error::{ParseError, ParseErrorKind};

const MULTIPLICATIVE: &[(TokenKind, BinaryOp)] =
    &[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div)];

const ADDITIVE: &[(TokenKind, BinaryOp)] =
    &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)];

const RELATIONAL: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::LtEq, BinaryOp::LtEq),
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::GtEq, BinaryOp::GtEq),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::Tilde, BinaryOp::Match),
    (TokenKind::TildeMatch, BinaryOp::Match),
    (TokenKind::In, BinaryOp::In),
];

const EQUALITY: &[(TokenKind, BinaryOp)] =
    &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::NotEq, BinaryOp::NotEq)];

/// Everything from primary expressions up to `or`.
pub(super) fn logical(primary: Parser<Expr>, expr: &Parser<Expr>) -> Parser<Expr> {
    let postfix = postfix(primary, expr);
    let unary = recursive(move |unary| {
        concat(token(TokenKind::Minus), unary, |minus, operand| {
            unary_expr(UnaryOp::Neg, operand, minus.location)
        })
        .or(postfix)
    });
    let multiplicative = left_associative(unary, MULTIPLICATIVE);
    let additive = left_associative(multiplicative, ADDITIVE);
    let relational = non_associative(additive, RELATIONAL);
    let equality = non_associative(relational, EQUALITY);
    let not = recursive(move |not| {
        concat(token(TokenKind::Not), not, |keyword, operand| {
            unary_expr(UnaryOp::Not, operand, keyword.location)
        })
        .or(equality)
    });
    let and = logical_chain(not, TokenKind::And, LogicalOp::And);
    logical_chain(and, TokenKind::Or, LogicalOp::Or)
}

/// A call or member access following an expression.
enum Suffix {
    Call {
        args: Vec<Expr>,
        kwargs: Vec<(Name, Expr)>,
        location: Location,
    },
    Get {
        name: Name,
        location: Location,
    },
}

enum Argument {
    Positional(Expr),
    Keyword(Name, Expr),
}

fn postfix(primary: Parser<Expr>, expr: &Parser<Expr>) -> Parser<Expr> {
    let call = concat(
        open(TokenKind::LeftParen),
        arguments(expr).before(close(TokenKind::RightParen)),
        |paren, (args, kwargs)| Suffix::Call {
            args,
            kwargs,
            location: paren.location,
        },
    );
    let get = token(TokenKind::Dot)
        .then(identifier())
        .map(|(name, location)| Suffix::Get { name, location });
    reduce(primary, call.or(get), apply_suffix)
}

fn apply_suffix(object: Expr, suffix: Suffix) -> Expr {
    match suffix {
        Suffix::Call {
            args,
            kwargs,
            location,
        } => Expr::new(
            ExprKind::Call {
                callee: Box::new(object),
                args,
                kwargs,
            },
            location,
        ),
        Suffix::Get { name, location } => Expr::new(
            ExprKind::Get {
                object: Box::new(object),
                name,
            },
            location,
        ),
    }
}

/// Positional arguments followed by `name: value` keyword arguments.
fn arguments(expr: &Parser<Expr>) -> Parser<(Vec<Expr>, Vec<(Name, Expr)>)> {
    let keyword = field(expr).map(|(name, value)| Argument::Keyword(name, value));
    let positional = expr.clone().map(Argument::Positional);
    keyword
        .or(positional)
        .many_separated_optionally_terminated(comma(), 0, None)
        .try_map(split_arguments)
}

fn split_arguments(items: Vec<Argument>) -> Result<(Vec<Expr>, Vec<(Name, Expr)>), ParseError> {
    let mut args = Vec::new();
    let mut kwargs = Vec::new();
    for item in items {
        match item {
            Argument::Keyword(name, value) => kwargs.push((name, value)),
            Argument::Positional(value) if kwargs.is_empty() => args.push(value),
            Argument::Positional(value) => {
                return Err(ParseError::at(
                    ParseErrorKind::PositionalAfterKeyword,
                    value.location,
                ));
            }
        }
    }
    Ok((args, kwargs))
}

fn operator(table: &'static [(TokenKind, BinaryOp)]) -> Parser<(BinaryOp, Location)> {
    alternate(
        table
            .iter()
            .map(|&(kind, op)| token(kind).map(move |token| (op, token.location)))
            .collect(),
    )
}

fn binary_expr(op: BinaryOp, left: Expr, right: Expr, location: Location) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        location,
    )
}

fn unary_expr(op: UnaryOp, operand: Expr, location: Location) -> Expr {
    Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        location,
    )
}

/// `operand (op operand)*`, folded to the left.
fn left_associative(
    operand: Parser<Expr>,
    table: &'static [(TokenKind, BinaryOp)],
) -> Parser<Expr> {
    operand.reduce_separated(operator(table), 1, |left, (op, location), right| {
        binary_expr(op, left, right, location)
    })
}

/// `operand [op operand]`: a second operator is left for the caller to
/// reject.
fn non_associative(
    operand: Parser<Expr>,
    table: &'static [(TokenKind, BinaryOp)],
) -> Parser<Expr> {
    let tail = concat(operator(table), operand.clone(), |op, right| (op, right));
    concat(operand, tail.maybe(), |left, tail| match tail {
        Some(((op, location), right)) => binary_expr(op, left, right, location),
        None => left,
    })
}

fn logical_chain(operand: Parser<Expr>, kind: TokenKind, op: LogicalOp) -> Parser<Expr> {
    let separator = token(kind).before(skip_newline());
    operand.reduce_separated(separator, 1, move |left, keyword, right| {
        Expr::new(
            ExprKind::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            keyword.location,
        )
    })
}
