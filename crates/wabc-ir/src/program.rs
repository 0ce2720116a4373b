//! The IR program (§3 "IR program", §4.4): a sequence of top-level
//! globals and functions, each function a flat list of structured
//! instructions with no labels and no jumps.

use wabc_par::ast::Type;
use wabc_util::Symbol;

use crate::instr::Instruction;

/// One compiled function: its signature plus a `LOCAL_DECL` prologue
/// (one per `var`/`const` declared anywhere in its body, in lexical
/// order) followed by its lowered body.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Symbol,
    pub params: Vec<(Symbol, Type)>,
    pub return_type: Type,
    pub instructions: Vec<Instruction>,
}

/// A whole compiled program: the flattened global declarations, then
/// `__init` (the synthesized initializer that runs the program's global
/// initializers in source order), then every user function in source
/// order, with a synthesized zero-returning `main` appended if the
/// source declared none (§4.3 "a program with no `main` still compiles
/// and runs, producing no output").
#[derive(Debug, Clone)]
pub struct Program {
    /// `GLOBAL_DECL name type`, one per top-level `var`/`const`, in
    /// source declaration order.
    pub globals: Vec<Instruction>,
    pub functions: Vec<Function>,
}

impl Program {
    /// The canonical serialization (§6): one record per instruction. Two
    /// compilations of the same source produce byte-identical output,
    /// since `Builder` never consults wall-clock time, randomness, or
    /// hash-map iteration order when choosing names or instruction
    /// order.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for instr in &self.globals {
            out.push_str(&instr.to_string());
            out.push('\n');
        }
        for func in &self.functions {
            let params = func
                .params
                .iter()
                .map(|(name, ty)| format!("{name}:{ty}"))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&format!("FUNC {} ({}) {}\n", func.name, params, func.return_type));
            for instr in &func.instructions {
                out.push_str(&instr.to_string());
                out.push('\n');
            }
        }
        out
    }
}
