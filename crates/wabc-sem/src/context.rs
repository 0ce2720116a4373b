//! The type side-table (§3 "every expression is assigned exactly one
//! type"; §9 "Polymorphism over AST nodes" — types are recorded beside
//! the AST, not by mutating it, keyed by the stable [`ExprId`] every
//! `Expr` carries).

use wabc_util::FxHashMap;

use wabc_par::ast::{ExprId, Type};
use wabc_util::DefId;

/// The semantic analyzer's output: a type for every expression, plus the
/// name-resolution result for every `Name` expression (or assignment
/// target) that resolved successfully.
#[derive(Debug, Default)]
pub struct TypeContext {
    types: FxHashMap<ExprId, Type>,
    resolutions: FxHashMap<ExprId, DefId>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&mut self, id: ExprId, ty: Type) {
        self.types.insert(id, ty);
    }

    /// The type of `id`, or `Type::Error` if analysis never reached it
    /// (always a bug if so, since every node is visited, but `Error` is a
    /// safe default rather than a panic for a side-table lookup).
    pub fn type_of(&self, id: ExprId) -> Type {
        self.types.get(&id).copied().unwrap_or(Type::Error)
    }

    pub fn record_resolution(&mut self, id: ExprId, def: DefId) {
        self.resolutions.insert(id, def);
    }

    pub fn resolution_of(&self, id: ExprId) -> Option<DefId> {
        self.resolutions.get(&id).copied()
    }
}
