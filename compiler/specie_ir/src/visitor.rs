//! Mutable AST traversal.
//!
//! Post-parse passes (node numbering, literal interning) rewrite nodes in
//! place. They implement [`VisitorMut`], override `visit_expr`, and call
//! [`walk_expr_mut`] to descend.
//!
//! Function bodies are stored behind `Rc`. The walk only descends into a
//! body when the `Rc` is unique, which holds for a freshly parsed tree.

use std::rc::Rc;

use crate::ast::{Expr, ExprKind, NodeId, ParamKind, StageKind};

pub trait VisitorMut {
    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr_mut(self, expr);
    }
}

/// Visit every direct child of `expr`, in source order.
pub fn walk_expr_mut<V: VisitorMut + ?Sized>(visitor: &mut V, expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::Literal(_) | ExprKind::Variable(_) => {}
        ExprKind::List(items) | ExprKind::Block(items) | ExprKind::Module(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        ExprKind::Record(fields) => {
            for (_, value) in fields {
                visitor.visit_expr(value);
            }
        }
        ExprKind::Grouping(inner) => visitor.visit_expr(inner),
        ExprKind::Call {
            callee,
            args,
            kwargs,
        } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
            for (_, arg) in kwargs {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Get { object, .. } => visitor.visit_expr(object),
        ExprKind::Set { object, value, .. } => {
            visitor.visit_expr(object);
            visitor.visit_expr(value);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_expr(else_branch);
            }
        }
        ExprKind::For { iterable, body, .. } => {
            visitor.visit_expr(iterable);
            visitor.visit_expr(body);
        }
        ExprKind::Query { source, stages, .. } => {
            visitor.visit_expr(source);
            for stage in stages {
                match &mut stage.kind {
                    StageKind::Select(e)
                    | StageKind::Where(e)
                    | StageKind::Drop(e)
                    | StageKind::Take(e)
                    | StageKind::Any(e)
                    | StageKind::All(e)
                    | StageKind::Each(e)
                    | StageKind::Sum(Some(e))
                    | StageKind::Min(Some(e))
                    | StageKind::Max(Some(e))
                    | StageKind::Average(Some(e)) => visitor.visit_expr(e),
                    StageKind::Fold { init, func } => {
                        visitor.visit_expr(init);
                        visitor.visit_expr(func);
                    }
                    StageKind::Distinct
                    | StageKind::Count
                    | StageKind::Sum(None)
                    | StageKind::Min(None)
                    | StageKind::Max(None)
                    | StageKind::Average(None)
                    | StageKind::Delete => {}
                }
            }
        }
        ExprKind::Function(decl) => {
            if let Some(decl) = Rc::get_mut(decl) {
                for param in &mut decl.params {
                    if let ParamKind::Optional(default) = &mut param.kind {
                        visitor.visit_expr(default);
                    }
                }
                visitor.visit_expr(&mut decl.body);
            }
        }
        ExprKind::Assignment { value, .. } | ExprKind::Declaration { value, .. } => {
            visitor.visit_expr(value);
        }
    }
}

struct NodeNumbering {
    next: u32,
}

impl VisitorMut for NodeNumbering {
    fn visit_expr(&mut self, expr: &mut Expr) {
        expr.id = NodeId::new(self.next);
        self.next += 1;
        walk_expr_mut(self, expr);
    }
}

/// Give every node in `root` a distinct id, in pre-order starting at 0.
/// Returns the number of ids handed out.
pub fn assign_node_ids(root: &mut Expr) -> u32 {
    let mut numbering = NodeNumbering { next: 0 };
    numbering.visit_expr(root);
    numbering.next
}

#[cfg(test)]
mod tests;
