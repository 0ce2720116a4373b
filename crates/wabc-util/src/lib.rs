//! Foundation types shared by every stage of the Wabbit compiler.
//!
//! This crate has no dependency on any other `wabc-*` crate. It provides:
//!
//! - [`span`]: source positions (`Span`, `FileId`) and the `SourceMap` that
//!   resolves them back to file/line/column for diagnostics.
//! - [`symbol`]: string interning (`Symbol`, `StringTable`) so identifiers
//!   and keywords compare as integers instead of strings.
//! - [`diagnostic`]: the `Diagnostic`/`Handler`/`DiagnosticBuilder` sink
//!   every stage reports compiler-user-facing errors and warnings through.
//! - [`index_vec`]: `Idx`/`IndexVec<I, T>`, typed-index collections that
//!   keep, say, a function's locals and another function's locals from
//!   being accidentally swapped.
//! - [`def_id`]: `DefId`, a process-wide identity for a declared function
//!   or variable, assigned by a `DefIdGenerator`.
//! - [`error`]: internal (non-diagnostic) error types for this crate's own
//!   fallible bookkeeping operations.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
