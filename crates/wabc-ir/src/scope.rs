//! Lightweight local-name classification for emission.
//!
//! `wabc-sem`'s `TypeContext` resolves `Expr::Name` reads to a `DefId`,
//! but assignment targets (`Location::Name`/`Location::MemStore`) carry
//! no `ExprId` to hang a resolution on, and `LOCAL_GET`/`SET` and
//! `GLOBAL_GET`/`SET` need a plain name either way (§4.4's family table
//! has no id operand). So the IR generator re-derives "is this name a
//! local right here" itself, by walking the same block nesting the
//! semantic analyzer already validated, rather than threading `DefId`s
//! through a new AST field.
//!
//! A second job falls out of the same walk: Wabbit's block scoping lets
//! a name be redeclared in a nested block while an outer declaration of
//! the same name is still live, but the flat per-function `LOCAL_DECL`
//! list needs one slot name per declaration. Shadowed redeclarations are
//! alpha-renamed (`x`, `x$1`, `x$2`, ...) so each slot gets a unique
//! name; unshadowed locals keep their source name unchanged.

use wabc_util::{FxHashMap, Symbol};

#[derive(Default)]
pub(crate) struct LocalNamer {
    frames: Vec<FxHashMap<Symbol, Symbol>>,
    counts: FxHashMap<Symbol, u32>,
}

impl LocalNamer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    /// Introduces a new local binding for `source`, returning its
    /// (possibly renamed) IR slot name. Two calls with the same
    /// `source`, in the same relative declaration order across a fresh
    /// `LocalNamer`, always return the same sequence of names — so a
    /// prologue-collection pass and the emission pass that follows it,
    /// run on the same tree in the same order, agree on every slot name.
    pub(crate) fn declare(&mut self, source: Symbol) -> Symbol {
        let count = self.counts.entry(source).or_insert(0);
        let ir_name = if *count == 0 {
            source
        } else {
            Symbol::intern(&format!("{source}${count}"))
        };
        *count += 1;
        self.frames
            .last_mut()
            .expect("declare called without an open frame")
            .insert(source, ir_name);
        ir_name
    }

    /// The IR slot name currently bound to `source`, or `None` if it
    /// isn't a local in scope here — in which case the caller treats it
    /// as a global (name existence was already validated by `wabc-sem`).
    pub(crate) fn resolve(&self, source: Symbol) -> Option<Symbol> {
        self.frames.iter().rev().find_map(|frame| frame.get(&source).copied())
    }
}
