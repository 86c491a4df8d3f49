//! Literal interning.
//!
//! Structurally equal literals share one `Rc` after this pass. The table
//! persists across inputs, so a literal repeated in later REPL lines reuses
//! the first instance too.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use specie_ir::visitor::{walk_expr_mut, VisitorMut};
use specie_ir::{Expr, ExprKind, Literal};

#[derive(Default)]
pub struct LiteralInterner {
    seen: FxHashSet<Rc<Literal>>,
}

impl LiteralInterner {
    pub fn new() -> Self {
        LiteralInterner::default()
    }

    /// Replace every literal payload in `root` with its shared instance.
    pub fn intern(&mut self, root: &mut Expr) {
        self.visit_expr(root);
        tracing::trace!(distinct = self.seen.len(), "interned literals");
    }

    /// Number of distinct literals seen so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl VisitorMut for LiteralInterner {
    fn visit_expr(&mut self, expr: &mut Expr) {
        if let ExprKind::Literal(literal) = &mut expr.kind {
            match self.seen.get(literal) {
                Some(shared) => *literal = Rc::clone(shared),
                None => {
                    self.seen.insert(Rc::clone(literal));
                }
            }
        }
        walk_expr_mut(self, expr);
    }
}

#[cfg(test)]
mod tests;
