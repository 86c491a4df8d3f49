//! AST nodes.
//!
//! The node set is closed: every construct of the language is one
//! `ExprKind` variant, and every consumer matches exhaustively. Statements
//! do not exist as a separate category; a module or block is a sequence of
//! expressions whose last value is the result.

use std::fmt;
use std::rc::Rc;

use crate::{Literal, Location, Name};

/// Identity of an AST node within one parsed unit.
///
/// Ids are assigned densely in pre-order by
/// [`assign_node_ids`](crate::visitor::assign_node_ids) after parsing; the
/// resolver keys its scope distances on them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct NodeId(u32);

impl NodeId {
    /// Placeholder carried by nodes until ids are assigned.
    pub const UNASSIGNED: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == NodeId::UNASSIGNED {
            write!(f, "NodeId(?)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Binary operators. Each one is evaluated by calling a capability method.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Match,
    /// `x in c` calls `contains` on the right operand.
    In,
}

impl BinaryOp {
    /// Capability method invoked for this operator.
    pub fn method_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Eq => "eq",
            BinaryOp::NotEq => "neq",
            BinaryOp::Lt => "lt",
            BinaryOp::LtEq => "lte",
            BinaryOp::Gt => "gt",
            BinaryOp::GtEq => "gte",
            BinaryOp::Match => "match",
            BinaryOp::In => "contains",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Match => "~",
            BinaryOp::In => "in",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `not x`: negated truthiness.
    Not,
    /// `-x`: the `neg` capability method.
    Neg,
}

/// Short-circuiting operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

/// How a function parameter receives its argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamKind {
    Required,
    /// Default expression, evaluated once when the function value is created.
    Optional(Expr),
    /// Collects all remaining positional arguments into a list.
    Variadic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub kind: ParamKind,
    pub location: Location,
}

/// A function literal's parameters and body.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub params: Vec<Param>,
    pub body: Expr,
}

/// One stage of a `from v in source ...` pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Stage {
    pub kind: StageKind,
    pub location: Location,
}

/// Query stages.
///
/// Expressions marked *per element* are evaluated once per element in a frame
/// that binds the query variable; the others are evaluated once, in the scope
/// enclosing the query.
#[derive(Clone, Debug, PartialEq)]
pub enum StageKind {
    /// Map each element (per element).
    Select(Expr),
    /// Keep elements whose expression is truthy (per element).
    Where(Expr),
    /// Drop elements equal to an earlier one.
    Distinct,
    /// Skip the first `n` elements.
    Drop(Expr),
    /// Keep at most `n` elements.
    Take(Expr),
    Count,
    /// Sum of the elements, or of a per-element key.
    Sum(Option<Expr>),
    Min(Option<Expr>),
    Max(Option<Expr>),
    Average(Option<Expr>),
    /// True if the expression holds for some element (per element).
    Any(Expr),
    /// True if the expression holds for every element (per element).
    All(Expr),
    /// Left fold: `fold init, f` calls `f(acc, element)`.
    Fold { init: Expr, func: Expr },
    /// Evaluate for effect (per element).
    Each(Expr),
    /// Remove the elements reaching this stage from the source container.
    Delete,
}

impl StageKind {
    /// Terminal stages consume the pipeline and produce a single value.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            StageKind::Select(_)
                | StageKind::Where(_)
                | StageKind::Distinct
                | StageKind::Drop(_)
                | StageKind::Take(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Select(_) => "select",
            StageKind::Where(_) => "where",
            StageKind::Distinct => "distinct",
            StageKind::Drop(_) => "drop",
            StageKind::Take(_) => "take",
            StageKind::Count => "count",
            StageKind::Sum(_) => "sum",
            StageKind::Min(_) => "min",
            StageKind::Max(_) => "max",
            StageKind::Average(_) => "average",
            StageKind::Any(_) => "any",
            StageKind::All(_) => "all",
            StageKind::Fold { .. } => "fold",
            StageKind::Each(_) => "each",
            StageKind::Delete => "delete",
        }
    }
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub location: Location,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Expr {
            id: NodeId::UNASSIGNED,
            location,
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Rc<Literal>),
    List(Vec<Expr>),
    Record(Vec<(Name, Expr)>),
    Variable(Name),
    Grouping(Box<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        kwargs: Vec<(Name, Expr)>,
    },
    Get {
        object: Box<Expr>,
        name: Name,
    },
    Set {
        object: Box<Expr>,
        name: Name,
        value: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    For {
        variable: Name,
        iterable: Box<Expr>,
        body: Box<Expr>,
    },
    Query {
        variable: Name,
        source: Box<Expr>,
        stages: Vec<Stage>,
    },
    Function(Rc<FunctionDecl>),
    Assignment {
        name: Name,
        value: Box<Expr>,
    },
    Declaration {
        name: Name,
        value: Box<Expr>,
    },
    Block(Vec<Expr>),
    Module(Vec<Expr>),
}
