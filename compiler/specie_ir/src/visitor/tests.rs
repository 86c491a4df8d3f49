use super::*;
use crate::{BinaryOp, FunctionDecl, Literal, Location, Name, Param};
use pretty_assertions::assert_eq;

fn int(value: i64) -> Expr {
    Expr::new(ExprKind::Literal(Rc::new(Literal::Int(value))), Location::START)
}

fn var(name: &str) -> Expr {
    Expr::new(ExprKind::Variable(Name::new(name)), Location::START)
}

#[test]
fn test_assign_node_ids_pre_order() {
    // (1 + x) with a function literal (y = 2): y
    let function = Expr::new(
        ExprKind::Function(Rc::new(FunctionDecl {
            params: vec![Param {
                name: Name::new("y"),
                kind: ParamKind::Optional(int(2)),
                location: Location::START,
            }],
            body: var("y"),
        })),
        Location::START,
    );
    let sum = Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(int(1)),
            right: Box::new(var("x")),
        },
        Location::START,
    );
    let mut module = Expr::new(ExprKind::Module(vec![sum, function]), Location::START);

    let count = assign_node_ids(&mut module);
    assert_eq!(count, 7);
    assert_eq!(module.id, NodeId::new(0));

    let ExprKind::Module(items) = &module.kind else {
        panic!("expected module");
    };
    assert_eq!(items[0].id, NodeId::new(1));
    let ExprKind::Binary { left, right, .. } = &items[0].kind else {
        panic!("expected binary");
    };
    assert_eq!((left.id, right.id), (NodeId::new(2), NodeId::new(3)));

    assert_eq!(items[1].id, NodeId::new(4));
    let ExprKind::Function(decl) = &items[1].kind else {
        panic!("expected function");
    };
    let ParamKind::Optional(default) = &decl.params[0].kind else {
        panic!("expected optional param");
    };
    assert_eq!(default.id, NodeId::new(5));
    assert_eq!(decl.body.id, NodeId::new(6));
}

#[test]
fn test_walk_skips_shared_function_bodies() {
    let decl = Rc::new(FunctionDecl {
        params: Vec::new(),
        body: var("z"),
    });
    let _keep_alive = Rc::clone(&decl);
    let mut expr = Expr::new(ExprKind::Function(decl), Location::START);
    assert_eq!(assign_node_ids(&mut expr), 1);
}
