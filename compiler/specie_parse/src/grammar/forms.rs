//! Keyword forms and the levels above `or`: control forms, blocks,
//! function literals, assignment and declaration.

use std::rc::Rc;

use specie_ir::{Expr, ExprKind, FunctionDecl, Location, Name, Param, ParamKind, Stage, StageKind, TokenKind};

use super::{close, comma, identifier, newline, open, skip_newline};
use crate::combinator::{alternate, concat, empty, recursive, token, Failure, Parser, Success};
use crate::error::{ParseError, ParseErrorKind};

/// The loosest levels, given the `or` level beneath them.
pub(super) fn expression(logical: Parser<Expr>, expr: &Parser<Expr>) -> Parser<Expr> {
    let control = alternate(vec![
        if_form(expr),
        for_form(expr),
        query_form(expr),
        logical,
    ]);
    let block_level = block(expr).or(control);
    let function_level = function(expr).or(block_level);
    let assignment = assignment(function_level);
    declaration(assignment.clone()).or(assignment)
}

/// `if c then a [else b]`.
fn if_form(expr: &Parser<Expr>) -> Parser<Expr> {
    let condition = concat(token(TokenKind::If), expr.clone(), |keyword, condition| {
        (keyword.location, condition)
    });
    let then_branch = skip_newline()
        .then(token(TokenKind::Then))
        .then(skip_newline())
        .then(expr.clone());
    let else_branch = skip_newline()
        .then(token(TokenKind::Else))
        .then(skip_newline())
        .then(expr.clone())
        .maybe();
    let head = concat(condition, then_branch, |(location, condition), then_branch| {
        (location, condition, then_branch)
    });
    concat(
        head,
        else_branch,
        |(location, condition, then_branch), else_branch| {
            Expr::new(
                ExprKind::If {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_branch: else_branch.map(Box::new),
                },
                location,
            )
        },
    )
}

/// `for v in iterable body`.
fn for_form(expr: &Parser<Expr>) -> Parser<Expr> {
    let head = concat(
        token(TokenKind::For),
        identifier().before(token(TokenKind::In)),
        |keyword, (variable, _)| (keyword.location, variable),
    );
    let head = concat(head, expr.clone(), |(location, variable), iterable| {
        (location, variable, iterable)
    });
    concat(
        head,
        skip_newline().then(expr.clone()),
        |(location, variable, iterable), body| {
            Expr::new(
                ExprKind::For {
                    variable,
                    iterable: Box::new(iterable),
                    body: Box::new(body),
                },
                location,
            )
        },
    )
}

/// `from v in source stage...`.
fn query_form(expr: &Parser<Expr>) -> Parser<Expr> {
    let head = concat(
        token(TokenKind::From),
        identifier().before(token(TokenKind::In)),
        |keyword, (variable, _)| (keyword.location, variable),
    );
    let head = concat(head, expr.clone(), |(location, variable), source| {
        (location, variable, source)
    });
    let stages = stage(expr).many(0, None).try_map(check_stage_order);
    concat(head, stages, |(location, variable, source), stages| {
        Expr::new(
            ExprKind::Query {
                variable,
                source: Box::new(source),
                stages,
            },
            location,
        )
    })
}

/// An identifier equal to `word`, ignoring case. Anything else fails
/// recoverably, so the next stage can be tried.
fn stage_word(word: &'static str) -> Parser<Location> {
    Parser::new(move |tokens, index| match tokens.get(index) {
        Some(token)
            if token.kind == TokenKind::Identifier
                && token
                    .ident()
                    .is_some_and(|name| name.as_str().eq_ignore_ascii_case(word)) =>
        {
            Ok(Success::new(token.location, index + 1))
        }
        _ => Err(Failure::recoverable(
            ParseError::unexpected(tokens, index, Some(word)),
            index,
        )),
    })
}

fn named_stage(word: &'static str, arguments: Parser<StageKind>) -> Parser<Stage> {
    concat(stage_word(word), arguments, |location, kind| Stage {
        kind,
        location,
    })
}

fn stage(expr: &Parser<Expr>) -> Parser<Stage> {
    let e = || expr.clone();
    let bare = |kind: StageKind| empty().value(kind);
    alternate(vec![
        named_stage("select", e().map(StageKind::Select)),
        named_stage("where", e().map(StageKind::Where)),
        named_stage("distinct", bare(StageKind::Distinct)),
        named_stage("drop", e().map(StageKind::Drop)),
        named_stage("take", e().map(StageKind::Take)),
        named_stage("count", bare(StageKind::Count)),
        named_stage("sum", e().maybe().map(StageKind::Sum)),
        named_stage("min", e().maybe().map(StageKind::Min)),
        named_stage("max", e().maybe().map(StageKind::Max)),
        named_stage("average", e().maybe().map(StageKind::Average)),
        named_stage("any", e().map(StageKind::Any)),
        named_stage("all", e().map(StageKind::All)),
        named_stage(
            "fold",
            concat(e(), comma().then(e()), |init, func| StageKind::Fold { init, func }),
        ),
        named_stage("each", e().map(StageKind::Each)),
        named_stage("delete", bare(StageKind::Delete)),
        unknown_stage(),
    ])
}

/// An identifier in stage position that names no stage.
fn unknown_stage() -> Parser<Stage> {
    identifier().try_map(|(name, location)| -> Result<Stage, ParseError> {
        Err(ParseError::at(ParseErrorKind::UnknownQueryStage(name), location))
    })
}

fn check_stage_order(stages: Vec<Stage>) -> Result<Vec<Stage>, ParseError> {
    if let Some(terminal) = stages.iter().position(|stage| stage.kind.is_terminal()) {
        if let Some(next) = stages.get(terminal + 1) {
            return Err(ParseError::at(
                ParseErrorKind::StageAfterTerminal {
                    terminal: stages[terminal].kind.name(),
                    stage: next.kind.name(),
                },
                next.location,
            ));
        }
    }
    Ok(stages)
}

/// `do expr... end`.
fn block(expr: &Parser<Expr>) -> Parser<Expr> {
    let body = expr.clone().many_separated(newline(), 0, None);
    concat(
        open(TokenKind::Do),
        body.before(close(TokenKind::End)),
        |keyword, body| Expr::new(ExprKind::Block(body), keyword.location),
    )
}

fn parameter(expr: &Parser<Expr>) -> Parser<Param> {
    let variadic = token(TokenKind::Ellipsis)
        .then(identifier())
        .map(|(name, location)| Param {
            name,
            kind: ParamKind::Variadic,
            location,
        });
    let optional = concat(
        identifier(),
        token(TokenKind::Assign).then(expr.clone()),
        |(name, location), default| Param {
            name,
            kind: ParamKind::Optional(default),
            location,
        },
    );
    let required = identifier().map(|(name, location)| Param {
        name,
        kind: ParamKind::Required,
        location,
    });
    alternate(vec![variadic, optional, required])
}

/// `(params): body`.
fn function(expr: &Parser<Expr>) -> Parser<Expr> {
    let params = parameter(expr).many_separated(comma(), 0, None);
    let head = concat(
        open(TokenKind::LeftParen),
        params
            .before(close(TokenKind::RightParen))
            .before(token(TokenKind::Colon)),
        |paren, params| (paren.location, params),
    );
    concat(head, skip_newline().then(expr.clone()), |head, body| (head, body)).try_map(
        |((location, params), body)| {
            check_parameter_order(&params)?;
            Ok(Expr::new(
                ExprKind::Function(Rc::new(FunctionDecl { params, body })),
                location,
            ))
        },
    )
}

/// Required parameters come first, then optional ones, then at most one
/// variadic parameter, which must be last.
fn check_parameter_order(params: &[Param]) -> Result<(), ParseError> {
    let mut seen_optional = false;
    let mut seen_variadic = false;
    for param in params {
        if seen_variadic {
            return Err(ParseError::at(
                ParseErrorKind::ParameterAfterVariadic(param.name.clone()),
                param.location,
            ));
        }
        match param.kind {
            ParamKind::Required if seen_optional => {
                return Err(ParseError::at(
                    ParseErrorKind::RequiredAfterOptional(param.name.clone()),
                    param.location,
                ));
            }
            ParamKind::Required => {}
            ParamKind::Optional(_) => seen_optional = true,
            ParamKind::Variadic => seen_variadic = true,
        }
    }
    Ok(())
}

/// `target = value`, right-associative. The target is parsed as an ordinary
/// expression and then checked.
fn assignment(operand: Parser<Expr>) -> Parser<Expr> {
    recursive(move |assignment| {
        let value = token(TokenKind::Assign)
            .then(skip_newline())
            .then(assignment)
            .maybe();
        concat(operand, value, |target, value| (target, value)).try_map(
            |(target, value)| match value {
                None => Ok(target),
                Some(value) => assign(target, value),
            },
        )
    })
}

fn assign(target: Expr, value: Expr) -> Result<Expr, ParseError> {
    let location = target.location;
    match target.kind {
        ExprKind::Variable(name) => Ok(Expr::new(
            ExprKind::Assignment {
                name,
                value: Box::new(value),
            },
            location,
        )),
        ExprKind::Get { object, name } => Ok(Expr::new(
            ExprKind::Set {
                object,
                name,
                value: Box::new(value),
            },
            location,
        )),
        _ => Err(ParseError::at(
            ParseErrorKind::InvalidAssignmentTarget,
            location,
        )),
    }
}

/// `var name = value`.
fn declaration(value: Parser<Expr>) -> Parser<Expr> {
    let head = concat(
        token(TokenKind::Var),
        identifier().before(token(TokenKind::Assign)),
        |keyword, (name, _): (Name, Location)| (keyword.location, name),
    );
    concat(head, skip_newline().then(value), |(location, name), value| {
        Expr::new(
            ExprKind::Declaration {
                name,
                value: Box::new(value),
            },
            location,
        )
    })
}
