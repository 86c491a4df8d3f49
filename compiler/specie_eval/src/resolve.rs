//! Static scope resolution.
//!
//! One pre-order walk over a parsed unit that mirrors the frames the
//! interpreter will create at runtime. For every variable read and
//! assignment it records how many frames to skip to reach the declaring
//! frame. Names that are not declared in any local frame get no entry and
//! are read from the global frame.
//!
//! Frames: blocks, function bodies, `for` bodies and per-element query stage
//! expressions push one frame each. A module pushes none, so top-level
//! declarations land in the global frame and persist across inputs.
//!
//! Inside a query stage, the frame also binds the fields of record elements,
//! which are only known at runtime. Names read there that are not declared
//! within the stage resolve to [`Resolution::Dynamic`] and are looked up by
//! name.

use rustc_hash::FxHashMap;
use specie_diagnostic::{Diagnostic, ErrorCode};
use specie_ir::{Expr, ExprKind, Location, Name, NodeId, ParamKind, StageKind};
use specie_stack::ensure_sufficient_stack;
use thiserror::Error;

/// Where a variable occurrence finds its binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// This many parent links up from the current frame.
    Local(usize),
    /// Walk the chain by name.
    Dynamic,
}

/// Resolutions of one parsed unit, keyed by node id.
#[derive(Debug, Default)]
pub struct Resolutions {
    map: FxHashMap<NodeId, Resolution>,
}

impl Resolutions {
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<Resolution> {
        self.map.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("Cannot read local variable in its own initializer")]
    OwnInitializer(Name),
    #[error("Variable '{0}' is already declared in this scope")]
    AlreadyDeclared(Name),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {location}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub location: Location,
}

impl ResolveError {
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ResolveErrorKind::OwnInitializer(_) => ErrorCode::E3001,
            ResolveErrorKind::AlreadyDeclared(_) => ErrorCode::E3002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message())
            .at(self.location)
    }
}

/// Resolve every variable occurrence in `root`.
pub fn resolve(root: &Expr) -> Result<Resolutions, ResolveError> {
    let mut resolver = Resolver::default();
    resolver.resolve(root)?;
    tracing::debug!(resolved = resolver.resolutions.len(), "resolved unit");
    Ok(resolver.resolutions)
}

#[derive(Default)]
struct Resolver {
    /// Local frames, innermost last. `false` marks declared but not yet
    /// initialized.
    scopes: Vec<FxHashMap<Name, bool>>,
    /// Index of the innermost query stage frame.
    stage_floor: Option<usize>,
    resolutions: Resolutions,
}

impl Resolver {
    fn resolve(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        ensure_sufficient_stack(|| self.resolve_inner(expr))
    }

    fn resolve_inner(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        match &expr.kind {
            ExprKind::Literal(_) => Ok(()),
            ExprKind::List(items) | ExprKind::Module(items) => self.resolve_all(items),
            ExprKind::Record(fields) => {
                for (_, value) in fields {
                    self.resolve(value)?;
                }
                Ok(())
            }
            ExprKind::Variable(name) => {
                if self
                    .scopes
                    .last()
                    .is_some_and(|scope| scope.get(name) == Some(&false))
                {
                    return Err(ResolveError {
                        kind: ResolveErrorKind::OwnInitializer(name.clone()),
                        location: expr.location,
                    });
                }
                self.resolve_local(expr.id, name);
                Ok(())
            }
            ExprKind::Grouping(inner) => self.resolve(inner),
            ExprKind::Call {
                callee,
                args,
                kwargs,
            } => {
                self.resolve(callee)?;
                self.resolve_all(args)?;
                for (_, arg) in kwargs {
                    self.resolve(arg)?;
                }
                Ok(())
            }
            ExprKind::Get { object, .. } => self.resolve(object),
            ExprKind::Set { object, value, .. } => {
                self.resolve(object)?;
                self.resolve(value)
            }
            ExprKind::Unary { operand, .. } => self.resolve(operand),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.resolve(left)?;
                self.resolve(right)
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve(condition)?;
                self.resolve(then_branch)?;
                match else_branch {
                    Some(else_branch) => self.resolve(else_branch),
                    None => Ok(()),
                }
            }
            ExprKind::For {
                variable,
                iterable,
                body,
            } => {
                self.resolve(iterable)?;
                self.with_scope(|this| {
                    this.define(variable);
                    this.resolve(body)
                })
            }
            ExprKind::Query {
                variable,
                source,
                stages,
            } => {
                self.resolve(source)?;
                for stage in stages {
                    match &stage.kind {
                        StageKind::Select(e)
                        | StageKind::Where(e)
                        | StageKind::Any(e)
                        | StageKind::All(e)
                        | StageKind::Each(e)
                        | StageKind::Sum(Some(e))
                        | StageKind::Min(Some(e))
                        | StageKind::Max(Some(e))
                        | StageKind::Average(Some(e)) => self.resolve_stage(variable, e)?,
                        StageKind::Drop(n) | StageKind::Take(n) => self.resolve(n)?,
                        StageKind::Fold { init, func } => {
                            self.resolve(init)?;
                            self.resolve(func)?;
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
                Ok(())
            }
            ExprKind::Function(decl) => {
                // Defaults are evaluated when the function value is created,
                // in the enclosing scope.
                for param in &decl.params {
                    if let ParamKind::Optional(default) = &param.kind {
                        self.resolve(default)?;
                    }
                }
                self.with_scope(|this| {
                    for param in &decl.params {
                        this.declare(&param.name, param.location)?;
                        this.define(&param.name);
                    }
                    this.resolve(&decl.body)
                })
            }
            ExprKind::Assignment { name, value } => {
                self.resolve(value)?;
                self.resolve_local(expr.id, name);
                Ok(())
            }
            ExprKind::Declaration { name, value } => {
                self.declare(name, expr.location)?;
                self.resolve(value)?;
                self.define(name);
                Ok(())
            }
            ExprKind::Block(items) => self.with_scope(|this| this.resolve_all(items)),
        }
    }

    fn resolve_all(&mut self, items: &[Expr]) -> Result<(), ResolveError> {
        for item in items {
            self.resolve(item)?;
        }
        Ok(())
    }

    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(FxHashMap::default());
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// A per-element stage expression: one frame binding the query variable.
    fn resolve_stage(&mut self, variable: &Name, expr: &Expr) -> Result<(), ResolveError> {
        self.with_scope(|this| {
            this.define(variable);
            let outer = this.stage_floor.replace(this.scopes.len() - 1);
            let result = this.resolve(expr);
            this.stage_floor = outer;
            result
        })
    }

    /// Declare in the innermost local frame. The global frame is not
    /// tracked; redeclaring a global is allowed.
    fn declare(&mut self, name: &Name, location: Location) -> Result<(), ResolveError> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        if scope.contains_key(name) {
            return Err(ResolveError {
                kind: ResolveErrorKind::AlreadyDeclared(name.clone()),
                location,
            });
        }
        scope.insert(name.clone(), false);
        Ok(())
    }

    fn define(&mut self, name: &Name) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &Name) {
        let innermost = self.scopes.len();
        for (index, scope) in self.scopes.iter().enumerate().rev() {
            if scope.contains_key(name) {
                let resolution = match self.stage_floor {
                    Some(floor) if index < floor => Resolution::Dynamic,
                    _ => Resolution::Local(innermost - 1 - index),
                };
                self.resolutions.map.insert(id, resolution);
                return;
            }
        }
        if self.stage_floor.is_some() {
            self.resolutions.map.insert(id, Resolution::Dynamic);
        }
    }
}

#[cfg(test)]
mod tests;
