//! Symbol table entries (§3 "Symbol table"): each binding records a kind,
//! a declared type or function signature, and a mutability flag.

use wabc_util::{DefId, IndexVec, Span, Symbol};

use wabc_par::ast::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Const,
    Param,
    Func,
    ImportedFunc,
}

impl SymbolKind {
    pub fn is_callable(self) -> bool {
        matches!(self, SymbolKind::Func | SymbolKind::ImportedFunc)
    }

    pub fn is_mutable(self) -> bool {
        matches!(self, SymbolKind::Var | SymbolKind::Param)
    }
}

/// A function's calling signature, recorded alongside its `SymbolKind`
/// entry so a `Call` can be checked without re-walking the declaration.
#[derive(Debug, Clone)]
pub struct FuncSig {
    pub params: Vec<Type>,
    pub return_type: Type,
}

#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub name: Symbol,
    pub kind: SymbolKind,
    /// For `Var`/`Const`/`Param`: the binding's type. For `Func`/
    /// `ImportedFunc`: the return type (mirrors `sig.return_type`, kept
    /// for uniform lookup by callers that only care about "the type of
    /// this name").
    pub ty: Type,
    pub sig: Option<FuncSig>,
    pub span: Span,
}

/// All symbols ever declared in a compilation, indexed by [`DefId`]. The
/// [`crate::scope::ScopeTree`] maps names to these ids per-scope; this
/// table is the flat backing store (§3: "an opaque storage handle later
/// consumed by the IR generator").
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexVec<DefId, SymbolInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: IndexVec::new() }
    }

    pub fn declare(&mut self, info: SymbolInfo) -> DefId {
        self.symbols.push(info)
    }

    pub fn get(&self, id: DefId) -> &SymbolInfo {
        &self.symbols[id]
    }

    pub fn get_mut(&mut self, id: DefId) -> &mut SymbolInfo {
        &mut self.symbols[id]
    }
}
