//! String interner backing [`Symbol`](super::Symbol).
//!
//! The compiler is single-threaded (every stage runs to completion, or to
//! first error, before the next begins), so the interner needs no
//! lock-free concurrent map: a single [`std::sync::Mutex`] guarding a
//! [`rustc_hash::FxHashMap`] plus a bump arena is enough, and keeps the
//! dependency footprint to what this crate actually uses.

use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use super::{InternerStats, Symbol};

/// Global string table, lazily initialized on first use.
pub static STRING_TABLE: OnceLock<StringTable> = OnceLock::new();

fn table() -> &'static StringTable {
    STRING_TABLE.get_or_init(|| {
        let table = StringTable::new();
        table.initialize_known_symbols();
        table
    })
}

/// Number of symbols reserved for Wabbit's known keywords and type names.
///
/// All symbols with index `< RESERVED_SYMBOLS_END` are known at compile
/// time; see the `KW_*`/`TY_*` constants in [`super`].
const RESERVED_SYMBOLS_END: u32 = 64;

struct Inner {
    /// hash(string) -> (string, index), for O(1) average lookup on intern.
    by_hash: FxHashMap<u64, (&'static str, u32)>,
    /// index -> string, for `Symbol::as_str`.
    by_index: Vec<&'static str>,
    arena: bumpalo::Bump,
}

/// Thread-safe (via a single internal mutex) interner mapping strings to
/// [`Symbol`]s and back.
///
/// Interned strings are allocated out of a bump arena and effectively
/// leaked for `'static` lifetime: the table lives for the whole process,
/// interned strings are never removed, and the compiler's total memory use
/// is bounded by the size of the source it was given.
pub struct StringTable {
    inner: Mutex<Inner>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl StringTable {
    fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                by_hash: FxHashMap::default(),
                by_index: Vec::with_capacity(RESERVED_SYMBOLS_END as usize),
                arena: bumpalo::Bump::new(),
            }),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Pre-intern Wabbit's fixed keyword and type-name set so that their
    /// `Symbol`s have stable, predictable low indices, matching the
    /// constants declared in [`super`].
    fn initialize_known_symbols(&self) {
        for word in super::KNOWN_SYMBOL_STRINGS {
            let sym = self.intern(word);
            debug_assert!(sym.is_known(), "known symbol {word:?} escaped reserved range");
        }
    }

    fn hash_string(s: &str) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut hasher = rustc_hash::FxHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }

    pub fn intern(&self, s: &str) -> Symbol {
        let hash = Self::hash_string(s);
        let mut inner = self.inner.lock().expect("string table mutex poisoned");

        if let Some(&(_, index)) = inner.by_hash.get(&hash).filter(|(existing, _)| *existing == s) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Symbol { index };
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let leaked: &'static str = inner.arena.alloc_str(s);
        // Safety: the arena outlives `STRING_TABLE`, which is never torn
        // down, so extending the borrow to `'static` is sound.
        let leaked: &'static str = unsafe { std::mem::transmute(leaked) };
        let index = inner.by_index.len() as u32;
        inner.by_index.push(leaked);
        inner.by_hash.insert(hash, (leaked, index));
        Symbol { index }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        let inner = self.inner.lock().expect("string table mutex poisoned");
        inner.by_index.get(symbol.index as usize).copied()
    }

    pub fn stats(&self) -> InternerStats {
        let inner = self.inner.lock().expect("string table mutex poisoned");
        InternerStats {
            count: inner.by_index.len(),
            capacity: inner.by_hash.capacity(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    #[cfg(test)]
    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

pub(super) fn intern(s: &str) -> Symbol {
    table().intern(s)
}

pub(super) fn get(symbol: Symbol) -> Option<&'static str> {
    table().get(symbol)
}

pub(super) fn stats() -> InternerStats {
    table().stats()
}

#[cfg(test)]
pub(super) fn reset_stats() {
    table().reset_stats()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let a = intern("hello");
        let b = intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_intern_differently() {
        assert_ne!(intern("hello"), intern("world"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = intern("wabbit_identifier");
        assert_eq!(get(sym), Some("wabbit_identifier"));
    }
}
