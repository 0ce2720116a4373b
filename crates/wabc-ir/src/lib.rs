//! Structured IR generation (§4.4).
//!
//! Walks the AST (already validated by [`wabc_sem`], which must have
//! reported zero `error`-severity diagnostics before this stage runs —
//! §2 "a later stage refuses to run if an earlier one reported an
//! error") together with its [`wabc_sem::context::TypeContext`] side
//! table, and emits a flat, per-function instruction list. Control flow
//! is structured — nested `IF`/`ELSE`/`ENDIF` and `LOOP`/`CBREAK`/
//! `CONTINUE`/`ENDLOOP` markers — rather than labels and jumps, so the
//! IR never needs a CFG or a register/stack allocator of its own.
//!
//! [`Builder`] performs the walk; [`verify_program`] checks the
//! resulting IR's structural invariants (§8 "Universal invariants").

pub mod builder;
pub mod instr;
pub mod program;
mod scope;
pub mod verify;

pub use builder::Builder;
pub use instr::{Instruction, Width};
pub use program::{Function, Program};
pub use verify::{verify_function, verify_program, VerifyError};
