//! Specie IR - shared data structures
//!
//! This crate contains the types every phase of the interpreter agrees on:
//! - `Location` for source positions and caret pointers
//! - `Name` for cheaply cloned identifiers
//! - `Token` and `TokenKind` for lexer output
//! - `Literal` and `RegexLiteral` for literal payloads; dates are
//!   `chrono::NaiveDate`
//! - AST nodes (`Expr`, `ExprKind`, `Stage`, `Param`)
//! - A mutable visitor used by the post-parse passes
//!
//! Nodes are plain owned trees (`Box<Expr>`). Function bodies sit behind an
//! `Rc` so closures can keep the body alive after the module that defined
//! them has finished evaluating.

pub mod ast;
mod literal;
mod location;
mod name;
mod token;
pub mod visitor;

pub use ast::{
    BinaryOp, Expr, ExprKind, FunctionDecl, LogicalOp, NodeId, Param, ParamKind, Stage,
    StageKind, UnaryOp,
};
pub use literal::{Literal, RegexFlags, RegexLiteral};
pub use location::Location;
pub use name::Name;
pub use token::{Token, TokenKind, TokenValue};
