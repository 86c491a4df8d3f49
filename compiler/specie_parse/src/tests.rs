#![allow(clippy::unwrap_used, reason = "tests unwrap parse results")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use specie_ir::{ExprKind, Location, NodeId};
use specie_lexer::LexErrorKind;

#[test]
fn test_node_ids_are_assigned_in_preorder() {
    let module = parse_module("1 + 2").unwrap();
    assert_eq!(module.id, NodeId::new(0));
    let ExprKind::Module(items) = &module.kind else {
        panic!("expected a module, got {module:?}");
    };
    let ExprKind::Binary { left, right, .. } = &items[0].kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(items[0].id, NodeId::new(1));
    assert_eq!(left.id, NodeId::new(2));
    assert_eq!(right.id, NodeId::new(3));
}

#[test]
fn test_lex_errors_surface_as_syntax_errors() {
    let err = parse_module("\"unterminated").unwrap_err();
    let SyntaxError::Lex(lex) = &err else {
        panic!("expected a lex error, got {err:?}");
    };
    assert_eq!(lex.kind, LexErrorKind::IllegalCharacter('"'));
    assert_eq!(err.location(), Some(Location::START));
}

#[test]
fn test_parse_expression_rejects_two_expressions() {
    assert!(parse_expression("1\n2").is_err());
    assert!(parse_module("1\n2").is_ok());
}

#[test]
fn test_error_points_at_the_furthest_token() {
    let err = parse_module("var x = (1 + )").unwrap_err();
    assert_eq!(err.location(), Some(Location::new(0, 13)));
}

proptest! {
    #[test]
    fn prop_sums_parse_left_associative(values in proptest::collection::vec(0i64..100, 1..12)) {
        let source = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" + ");
        let mut expr = parse_expression(&source).unwrap();
        let mut operands = 1;
        while let ExprKind::Binary { left, .. } = expr.kind {
            operands += 1;
            expr = *left;
        }
        prop_assert_eq!(operands, values.len());
    }
}
