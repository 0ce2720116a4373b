//! The symbol table (§3 "Symbol table"): a stack of scopes ("ribs"), one
//! for the global module, one per function, one per block.

use wabc_util::{DefId, FxHashMap, Idx, IndexVec, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RibId(pub u32);

impl Idx for RibId {
    fn from_usize(idx: usize) -> Self {
        RibId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RibKind {
    Module,
    Function,
    Block,
    /// Wabbit's `while` is the only loop form and is never labeled, so
    /// this carries no payload — it exists purely so `break`/`continue`
    /// validation can walk up to the nearest one (§4.3 "loop-depth
    /// counter").
    Loop,
}

#[derive(Debug)]
pub struct Rib {
    pub bindings: FxHashMap<Symbol, DefId>,
    pub parent: Option<RibId>,
    pub kind: RibKind,
}

/// A stack of scopes, implemented as a tree of ribs plus a cursor at the
/// currently active one (§3 "stack of scopes").
pub struct ScopeTree {
    pub ribs: IndexVec<RibId, Rib>,
    pub current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib { bindings: FxHashMap::default(), parent: None, kind: RibKind::Module });
        Self { ribs, current: root }
    }

    pub fn enter(&mut self, kind: RibKind) -> RibId {
        let rib = self.ribs.push(Rib { bindings: FxHashMap::default(), parent: Some(self.current), kind });
        self.current = rib;
        rib
    }

    pub fn exit(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    /// Binds `name` in the current rib. Returns `false` (without
    /// overwriting) if `name` is already bound in *this* rib — a
    /// same-scope redeclaration (§3 invariant, `SCOPE_DUPLICATE_DECL`).
    pub fn bind(&mut self, name: Symbol, id: DefId) -> bool {
        let rib = &mut self.ribs[self.current];
        if rib.bindings.contains_key(&name) {
            false
        } else {
            rib.bindings.insert(name, id);
            true
        }
    }

    /// Looks up `name` outward through enclosing ribs (§3: "a name
    /// introduced in a scope shadows outer bindings only within that
    /// scope").
    pub fn resolve(&self, name: Symbol) -> Option<DefId> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(&id) = rib.bindings.get(&name) {
                return Some(id);
            }
            rib_id = rib.parent?;
        }
    }

    /// Whether a `break`/`continue` currently has an enclosing loop to
    /// target, walking outward but never past a function boundary (a
    /// nested function, were Wabbit to allow one, would not see an outer
    /// loop — moot today since nested functions are rejected at parse
    /// time, but kept as the semantically correct walk).
    pub fn in_loop(&self) -> bool {
        let mut rib_id = self.current;
        loop {
            match self.ribs[rib_id].kind {
                RibKind::Loop => return true,
                RibKind::Function | RibKind::Module => return false,
                RibKind::Block => {}
            }
            match self.ribs[rib_id].parent {
                Some(parent) => rib_id = parent,
                None => return false,
            }
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
