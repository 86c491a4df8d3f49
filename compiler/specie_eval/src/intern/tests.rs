#![allow(clippy::unwrap_used, reason = "tests unwrap parse results")]

use super::*;
use pretty_assertions::assert_eq;
use specie_parse::parse_module;

fn literals(root: &mut Expr) -> Vec<Rc<Literal>> {
    struct Collect(Vec<Rc<Literal>>);

    impl VisitorMut for Collect {
        fn visit_expr(&mut self, expr: &mut Expr) {
            if let ExprKind::Literal(literal) = &expr.kind {
                self.0.push(Rc::clone(literal));
            }
            walk_expr_mut(self, expr);
        }
    }

    let mut collect = Collect(Vec::new());
    collect.visit_expr(root);
    collect.0
}

#[test]
fn test_equal_literals_share_one_instance() {
    let mut tree = parse_module("[\"a\", \"a\", 1, 1, \"b\"]").unwrap();
    let mut interner = LiteralInterner::new();
    interner.intern(&mut tree);

    let found = literals(&mut tree);
    assert_eq!(found.len(), 5);
    assert!(Rc::ptr_eq(&found[0], &found[1]));
    assert!(Rc::ptr_eq(&found[2], &found[3]));
    assert!(!Rc::ptr_eq(&found[0], &found[4]));
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_int_and_float_stay_distinct() {
    let mut tree = parse_module("[1, 1.0]").unwrap();
    let mut interner = LiteralInterner::new();
    interner.intern(&mut tree);
    let found = literals(&mut tree);
    assert!(!Rc::ptr_eq(&found[0], &found[1]));
}

#[test]
fn test_table_persists_across_units() {
    let mut interner = LiteralInterner::new();
    let mut first = parse_module("\"shared\"").unwrap();
    let mut second = parse_module("\"shared\"").unwrap();
    interner.intern(&mut first);
    interner.intern(&mut second);
    let (a, b) = (literals(&mut first), literals(&mut second));
    assert!(Rc::ptr_eq(&a[0], &b[0]));
}

#[test]
fn test_interning_preserves_tree() {
    let source = "var f = (x = 2): x * 2\nf(2)";
    let original = parse_module(source).unwrap();
    let mut tree = original.clone();
    LiteralInterner::new().intern(&mut tree);
    assert_eq!(tree, original);
}
