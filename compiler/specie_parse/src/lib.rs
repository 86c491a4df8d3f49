//! Parser for specie.
//!
//! Two layers:
//! - [`combinator`]: a small backtracking parser-combinator library over a
//!   token slice
//! - [`grammar`]: the language grammar written with those combinators
//!
//! The entry points lex, parse and number the nodes of a tree in one call.

pub mod combinator;
mod error;
pub mod grammar;

use specie_ir::visitor::assign_node_ids;
use specie_ir::{Expr, Token};
use specie_stack::ensure_sufficient_stack;
use tracing::debug;

pub use error::{ParseError, ParseErrorKind, SyntaxError};
pub use grammar::Grammar;

use combinator::Parser;

thread_local! {
    static GRAMMAR: Grammar = Grammar::new();
}

/// Parse a whole program: newline-separated expressions.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_module(source: &str) -> Result<Expr, SyntaxError> {
    parse_with(source, Grammar::module)
}

/// Parse a single expression spanning the whole source.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_expression(source: &str) -> Result<Expr, SyntaxError> {
    parse_with(source, Grammar::expression)
}

fn parse_with(
    source: &str,
    entry: fn(&Grammar) -> &Parser<Expr>,
) -> Result<Expr, SyntaxError> {
    let tokens = specie_lexer::tokenize(source)?;
    let mut tree = GRAMMAR.with(|grammar| run(entry(grammar), &tokens))?;
    let nodes = assign_node_ids(&mut tree);
    debug!(tokens = tokens.len(), nodes, "parsed");
    Ok(tree)
}

fn run(parser: &Parser<Expr>, tokens: &[Token]) -> Result<Expr, ParseError> {
    ensure_sufficient_stack(|| parser.parse(tokens, 0))
        .map(|success| success.value)
        .map_err(|failure| failure.error)
}

#[cfg(test)]
mod tests;
