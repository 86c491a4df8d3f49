#![allow(clippy::unwrap_used, reason = "tests unwrap parse results")]

use super::*;
use pretty_assertions::assert_eq;
use specie_ir::visitor::{walk_expr_mut, VisitorMut};
use specie_parse::parse_module;

/// Every variable read and assignment in `source`, in pre-order, with its
/// resolution.
fn resolutions_of(source: &str) -> Vec<(String, Option<Resolution>)> {
    struct Occurrences(Vec<(String, NodeId)>);

    impl VisitorMut for Occurrences {
        fn visit_expr(&mut self, expr: &mut Expr) {
            match &expr.kind {
                ExprKind::Variable(name) | ExprKind::Assignment { name, .. } => {
                    self.0.push((name.to_string(), expr.id));
                }
                _ => {}
            }
            walk_expr_mut(self, expr);
        }
    }

    let mut tree = parse_module(source).unwrap();
    let resolutions = resolve(&tree).unwrap();
    let mut occurrences = Occurrences(Vec::new());
    occurrences.visit_expr(&mut tree);
    occurrences
        .0
        .into_iter()
        .map(|(name, id)| (name, resolutions.get(id)))
        .collect()
}

fn resolve_error(source: &str) -> ResolveError {
    resolve(&parse_module(source).unwrap()).unwrap_err()
}

fn at(name: &str, resolution: Option<Resolution>) -> (String, Option<Resolution>) {
    (name.to_owned(), resolution)
}

#[test]
fn test_globals_have_no_entry() {
    assert_eq!(
        resolutions_of("var x = 1\nx = x + 1"),
        vec![at("x", None), at("x", None)]
    );
}

#[test]
fn test_block_local_distance() {
    assert_eq!(
        resolutions_of("do\nvar x = 1\nx\nend"),
        vec![at("x", Some(Resolution::Local(0)))]
    );
}

#[test]
fn test_parameter_seen_from_nested_block() {
    assert_eq!(
        resolutions_of("var f = (a):\ndo\na\nend"),
        vec![at("a", Some(Resolution::Local(1)))]
    );
}

#[test]
fn test_for_variable_is_local() {
    assert_eq!(
        resolutions_of("for x in xs x * 2"),
        vec![at("xs", None), at("x", Some(Resolution::Local(0)))]
    );
}

#[test]
fn test_default_resolves_in_enclosing_scope() {
    assert_eq!(
        resolutions_of("do\nvar d = 1\nvar f = (a = d): a\nend"),
        vec![
            at("d", Some(Resolution::Local(0))),
            at("a", Some(Resolution::Local(0))),
        ]
    );
}

#[test]
fn test_stage_names_are_dynamic_unless_bound_in_stage() {
    assert_eq!(
        resolutions_of("from t in xs where a > 1 select t"),
        vec![
            at("xs", None),
            at("a", Some(Resolution::Dynamic)),
            at("t", Some(Resolution::Local(0))),
        ]
    );
}

#[test]
fn test_outer_local_inside_stage_is_dynamic() {
    assert_eq!(
        resolutions_of("do\nvar limit = 1\nfrom t in xs where t > limit\nend"),
        vec![
            at("xs", None),
            at("t", Some(Resolution::Local(0))),
            at("limit", Some(Resolution::Dynamic)),
        ]
    );
}

#[test]
fn test_take_count_resolves_outside_stage() {
    assert_eq!(
        resolutions_of("do\nvar n = 2\nfrom t in xs take n\nend"),
        vec![at("xs", None), at("n", Some(Resolution::Local(0)))]
    );
}

#[test]
fn test_own_initializer_is_rejected() {
    let err = resolve_error("do\nvar x = x\nend");
    assert_eq!(err.kind, ResolveErrorKind::OwnInitializer(Name::new("x")));
    assert_eq!(err.location, Location::new(1, 8));
    assert_eq!(
        err.message(),
        "Cannot read local variable in its own initializer"
    );
}

#[test]
fn test_duplicate_local_declaration_is_rejected() {
    let err = resolve_error("do\nvar x = 1\nvar x = 2\nend");
    assert_eq!(err.kind, ResolveErrorKind::AlreadyDeclared(Name::new("x")));
    assert_eq!(err.code(), ErrorCode::E3002);
    assert_eq!(
        err.message(),
        "Variable 'x' is already declared in this scope"
    );
}

#[test]
fn test_duplicate_parameter_is_rejected() {
    let err = resolve_error("(a, a): a");
    assert_eq!(err.kind, ResolveErrorKind::AlreadyDeclared(Name::new("a")));
}

#[test]
fn test_global_redeclaration_is_allowed() {
    assert!(resolve(&parse_module("var x = 1\nvar x = 2").unwrap()).is_ok());
}
