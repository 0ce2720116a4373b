//! An in-memory tree-walking interpreter `Backend`, gated behind the
//! `test-interp` feature (§10.5: "test tooling, not a back-end
//! implementation"). It exists only so that §8's concrete scenarios can
//! be asserted as actual program output instead of inspected as raw IR
//! text — no real back-end (LLVM/WASM/Python) lives in this repository.
//!
//! Walks the flat structured instruction stream directly with an
//! explicit position cursor, the same region-scanning shape
//! `wabc_ir::verify` uses to check nesting, generalized here to also
//! execute each instruction rather than just track stack depth.

use wabc_ir::{Function, Instruction, Program, Width};
use wabc_par::ast::Type;
use wabc_sem::symtab::SymbolTable;
use wabc_util::{FxHashMap, Symbol};

use crate::{Backend, BackendError};

/// One runtime value. Widths line up with [`Width`]: `I`/`F`/`C`/`B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I(i32),
    F(f64),
    C(u8),
    B(bool),
}

impl Value {
    fn default_for(ty: Type) -> Value {
        match ty {
            Type::Int => Value::I(0),
            Type::Float => Value::F(0.0),
            Type::Char => Value::C(0),
            Type::Bool => Value::B(false),
            Type::Error => unreachable!("interpreter only runs on verified IR"),
        }
    }

    fn as_i32(self) -> i32 {
        match self {
            Value::I(n) => n,
            other => panic!("expected Int, found {other:?}"),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Value::F(x) => x,
            other => panic!("expected Float, found {other:?}"),
        }
    }

    fn as_bool(self) -> bool {
        match self {
            Value::B(b) => b,
            other => panic!("expected Bool, found {other:?}"),
        }
    }

    fn width_bytes(width: Width) -> usize {
        match width {
            Width::I => 4,
            Width::F => 8,
            Width::C | Width::B => 1,
        }
    }

    fn load(width: Width, bytes: &[u8]) -> Value {
        match width {
            Width::I => Value::I(i32::from_le_bytes(bytes.try_into().unwrap())),
            Width::F => Value::F(f64::from_le_bytes(bytes.try_into().unwrap())),
            Width::C => Value::C(bytes[0]),
            Width::B => Value::B(bytes[0] != 0),
        }
    }

    fn store(self, width: Width, out: &mut [u8]) {
        match (width, self) {
            (Width::I, Value::I(n)) => out.copy_from_slice(&n.to_le_bytes()),
            (Width::F, Value::F(x)) => out.copy_from_slice(&x.to_le_bytes()),
            (Width::C, Value::C(b)) => out[0] = b,
            (Width::B, Value::B(b)) => out[0] = b as u8,
            (width, value) => panic!("POKE{width:?} given a mismatched value {value:?}"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::I(n) => write!(f, "{n}"),
            Value::F(x) => write!(f, "{x}"),
            Value::C(b) => write!(f, "{}", *b as char),
            Value::B(b) => write!(f, "{b}"),
        }
    }
}

/// How a region of instructions finished: fell through, hit a loop
/// control-flow statement, or unwound a `RETURN`.
enum Signal {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Interprets one verified IR [`Program`]. Single-threaded and
/// recursive — a call frame is a Rust stack frame, matching the IR's
/// own recursive function-call model (§4.4).
pub struct Interpreter<'p> {
    functions: FxHashMap<Symbol, &'p Function>,
    globals: FxHashMap<Symbol, Value>,
    memory: Vec<u8>,
    output: Vec<String>,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program) -> Self {
        let functions = program.functions.iter().map(|f| (f.name, f)).collect();
        Interpreter { functions, globals: FxHashMap::default(), memory: Vec::new(), output: Vec::new() }
    }

    /// Runs `GLOBAL_DECL`s, then `__init`, then `main`, returning every
    /// line `print` produced, in order.
    pub fn run(mut self, program: &Program) -> Vec<String> {
        for decl in &program.globals {
            if let Instruction::GlobalDecl(name, ty) = decl {
                self.globals.insert(*name, Value::default_for(*ty));
            }
        }
        self.call(Symbol::intern("__init"), Vec::new());
        self.call(Symbol::intern("main"), Vec::new());
        self.output
    }

    fn call(&mut self, name: Symbol, args: Vec<Value>) -> Value {
        let func = *self.functions.get(&name).unwrap_or_else(|| panic!("call to undefined function `{name}`"));
        let mut locals = FxHashMap::default();
        for ((param, _), arg) in func.params.iter().zip(args) {
            locals.insert(*param, arg);
        }
        let mut stack = Vec::new();
        let mut pos = 0;
        match self.exec_region(func, &func.instructions, &mut pos, &mut stack, &mut locals) {
            Signal::Return(value) => value,
            // A verified function always ends in `RETURN`; this only
            // fires if `exec_region` reached the end of the top-level
            // region without one, which `verify_function` rejects.
            _ => unreachable!("verified function fell off its end without RETURN"),
        }
    }

    /// Executes instructions from `*pos` until a region terminator
    /// (`ELSE`/`ENDIF`/`ENDLOOP`), the end of the instruction list, or an
    /// early-exit [`Signal`]. Mirrors `wabc_ir::verify`'s region walk.
    fn exec_region(
        &mut self,
        func: &Function,
        instrs: &[Instruction],
        pos: &mut usize,
        stack: &mut Vec<Value>,
        locals: &mut FxHashMap<Symbol, Value>,
    ) -> Signal {
        while *pos < instrs.len() {
            match &instrs[*pos] {
                Instruction::Else | Instruction::EndIf | Instruction::EndLoop => return Signal::Normal,
                Instruction::If => {
                    let cond = stack.pop().unwrap().as_bool();
                    *pos += 1;
                    let signal = if cond {
                        let signal = self.exec_region(func, instrs, pos, stack, locals);
                        *pos += 1; // ELSE
                        skip_region(instrs, pos); // now at ENDIF
                        signal
                    } else {
                        skip_region(instrs, pos); // now at ELSE
                        *pos += 1; // ELSE
                        self.exec_region(func, instrs, pos, stack, locals)
                        // now at ENDIF
                    };
                    *pos += 1; // ENDIF
                    if !matches!(signal, Signal::Normal) {
                        return signal;
                    }
                }
                Instruction::Loop => {
                    *pos += 1;
                    let body_start = *pos;
                    loop {
                        let mut body_pos = body_start;
                        match self.exec_region(func, instrs, &mut body_pos, stack, locals) {
                            Signal::Normal | Signal::Continue => continue,
                            Signal::Break => break,
                            Signal::Return(value) => return Signal::Return(value),
                        }
                    }
                    *pos = body_start;
                    skip_region(instrs, pos);
                    *pos += 1; // ENDLOOP
                }
                Instruction::CBreak => {
                    *pos += 1;
                    if stack.pop().unwrap().as_bool() {
                        return Signal::Break;
                    }
                }
                Instruction::Continue => {
                    return Signal::Continue;
                }
                Instruction::Return => {
                    *pos += 1;
                    return Signal::Return(stack.pop().unwrap());
                }
                other => {
                    self.exec_instr(other, stack, locals);
                    *pos += 1;
                }
            }
        }
        Signal::Normal
    }

    fn exec_instr(&mut self, instr: &Instruction, stack: &mut Vec<Value>, locals: &mut FxHashMap<Symbol, Value>) {
        use Instruction::*;
        match instr {
            ConstI(n) => stack.push(Value::I(*n)),
            ConstF(x) => stack.push(Value::F(*x)),
            ConstC(b) => stack.push(Value::C(*b)),
            ConstB(b) => stack.push(Value::B(*b)),

            Add(w) => binop(stack, *w, |a, b| a + b, |a, b| a + b),
            Sub(w) => binop(stack, *w, |a, b| a - b, |a, b| a - b),
            Mul(w) => binop(stack, *w, |a, b| a * b, |a, b| a * b),
            Div(w) => binop(stack, *w, |a, b| a / b, |a, b| a / b),
            Neg(w) => {
                let v = stack.pop().unwrap();
                stack.push(match w {
                    Width::I => Value::I(-v.as_i32()),
                    Width::F => Value::F(-v.as_f64()),
                    Width::C | Width::B => panic!("NEG{w:?} has no char/bool form"),
                });
            }

            Lt(w) => relop(stack, *w, |a, b| a < b, |a, b| a < b),
            Le(w) => relop(stack, *w, |a, b| a <= b, |a, b| a <= b),
            Gt(w) => relop(stack, *w, |a, b| a > b, |a, b| a > b),
            Ge(w) => relop(stack, *w, |a, b| a >= b, |a, b| a >= b),
            Eq(w) => eqop(stack, *w, true),
            Ne(w) => eqop(stack, *w, false),

            And => {
                let b = stack.pop().unwrap().as_bool();
                let a = stack.pop().unwrap().as_bool();
                stack.push(Value::B(a && b));
            }
            Or => {
                let b = stack.pop().unwrap().as_bool();
                let a = stack.pop().unwrap().as_bool();
                stack.push(Value::B(a || b));
            }
            Not => {
                let a = stack.pop().unwrap().as_bool();
                stack.push(Value::B(!a));
            }

            ItoF => {
                let a = stack.pop().unwrap().as_i32();
                stack.push(Value::F(a as f64));
            }
            FtoI => {
                let a = stack.pop().unwrap().as_f64();
                stack.push(Value::I(a as i32));
            }

            Peek(w) => {
                let addr = stack.pop().unwrap().as_i32() as usize;
                let n = Value::width_bytes(*w);
                self.ensure_memory(addr + n);
                stack.push(Value::load(*w, &self.memory[addr..addr + n]));
            }
            Poke(w) => {
                let addr = stack.pop().unwrap().as_i32() as usize;
                let value = stack.pop().unwrap();
                let n = Value::width_bytes(*w);
                self.ensure_memory(addr + n);
                value.store(*w, &mut self.memory[addr..addr + n]);
            }
            Grow => {
                let by = stack.pop().unwrap().as_i32() as usize;
                let new_len = self.memory.len() + by;
                self.ensure_memory(new_len);
                stack.push(Value::I(self.memory.len() as i32));
            }

            LocalGet(name) => stack.push(*locals.get(name).unwrap_or_else(|| panic!("undeclared local `{name}`"))),
            LocalSet(name) => {
                let v = stack.pop().unwrap();
                locals.insert(*name, v);
            }
            GlobalGet(name) => stack.push(*self.globals.get(name).unwrap_or_else(|| panic!("undeclared global `{name}`"))),
            GlobalSet(name) => {
                let v = stack.pop().unwrap();
                self.globals.insert(*name, v);
            }
            LocalDecl(name, ty) => {
                locals.insert(*name, Value::default_for(*ty));
            }
            GlobalDecl(name, ty) => {
                self.globals.entry(*name).or_insert_with(|| Value::default_for(*ty));
            }

            Call(name, arity) => {
                let mut args = (0..*arity).map(|_| stack.pop().unwrap()).collect::<Vec<_>>();
                args.reverse();
                stack.push(self.call(*name, args));
            }
            Print(_) => {
                let v = stack.pop().unwrap();
                self.output.push(v.to_string());
            }
            Drop => {
                stack.pop().unwrap();
            }

            If | Else | EndIf | Loop | CBreak | Continue | EndLoop | Return => {
                unreachable!("structured markers are handled by exec_region")
            }
        }
    }

    fn ensure_memory(&mut self, len: usize) {
        if self.memory.len() < len {
            self.memory.resize(len, 0);
        }
    }
}

/// Advances `pos` past a balanced region without executing it, landing
/// on its terminator. Used for the not-taken `IF` arm and to locate a
/// `LOOP`'s `ENDLOOP` once its body has already run to completion.
fn skip_region(instrs: &[Instruction], pos: &mut usize) {
    let mut depth = 0u32;
    loop {
        match &instrs[*pos] {
            Instruction::If | Instruction::Loop => depth += 1,
            Instruction::EndIf | Instruction::EndLoop if depth > 0 => depth -= 1,
            Instruction::Else | Instruction::EndIf | Instruction::EndLoop if depth == 0 => return,
            _ => {}
        }
        *pos += 1;
    }
}

fn binop(stack: &mut Vec<Value>, w: Width, fi: fn(i32, i32) -> i32, ff: fn(f64, f64) -> f64) {
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    stack.push(match w {
        Width::I => Value::I(fi(a.as_i32(), b.as_i32())),
        Width::F => Value::F(ff(a.as_f64(), b.as_f64())),
        Width::C | Width::B => panic!("arithmetic has no char/bool form"),
    });
}

fn relop(stack: &mut Vec<Value>, w: Width, fi: fn(i32, i32) -> bool, ff: fn(f64, f64) -> bool) {
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    stack.push(Value::B(match w {
        Width::I => fi(a.as_i32(), b.as_i32()),
        Width::F => ff(a.as_f64(), b.as_f64()),
        Width::C | Width::B => panic!("relational comparison has no char/bool form"),
    }));
}

fn eqop(stack: &mut Vec<Value>, w: Width, want_eq: bool) {
    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    let eq = match w {
        Width::I => a.as_i32() == b.as_i32(),
        Width::F => a.as_f64() == b.as_f64(),
        Width::C => a == b,
        Width::B => a.as_bool() == b.as_bool(),
    };
    stack.push(Value::B(eq == want_eq));
}

/// The `test-interp` [`Backend`]: runs the program to completion and
/// hands back every line it printed, in order.
#[derive(Debug, Default)]
pub struct InterpBackend;

impl Backend for InterpBackend {
    type Output = Vec<String>;

    fn emit(&self, program: &Program, _symtab: &SymbolTable) -> Result<Self::Output, BackendError> {
        wabc_ir::verify_program(program)?;
        Ok(Interpreter::new(program).run(program))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabc_drv::{Config, Session};

    fn run(source: &str) -> Vec<String> {
        let mut session = Session::new(Config::default());
        let output = session.compile_str(source).unwrap();
        assert!(!session.has_errors(), "{:?}", session.render_diagnostics());
        let ir = output.ir.expect("compilation should have reached irgen");
        Interpreter::new(&ir).run(&ir)
    }

    #[test]
    fn scenario_1_simple_arithmetic() {
        assert_eq!(run("var a int = 2; var b int = 3; print a + b;"), vec!["5"]);
    }

    #[test]
    fn scenario_3_fibonacci_loop() {
        let source = "\
            func main() int {\n\
                var a int = 1;\n\
                var b int = 1;\n\
                var n int = 0;\n\
                while n < 10 {\n\
                    print a;\n\
                    var next int = a + b;\n\
                    a = b;\n\
                    b = next;\n\
                    n = n + 1;\n\
                }\n\
                return 0;\n\
            }\n\
        ";
        assert_eq!(run(source), vec!["1", "1", "2", "3", "5", "8", "13", "21", "34", "55"]);
    }

    #[test]
    fn scenario_4_break_inside_while() {
        let source = "var n int = 0; while n < 5 { if n == 3 { break; } print n; n = n + 1; }";
        assert_eq!(run(source), vec!["0", "1", "2"]);
    }

    #[test]
    fn scenario_5_short_circuit_or_skips_division() {
        assert_eq!(run("var x int = 10; print (x != 0) || (10 / 0 == 0);"), vec!["true"]);
    }

    #[test]
    fn scenario_6_memory_poke_peek_round_trip() {
        assert_eq!(run("func main() int { `1000 = 42; print `1000; return 0; }"), vec!["42"]);
    }

    #[test]
    fn recursive_calls_share_no_state_across_frames() {
        let source = "func fact(n int) int { if n <= 1 { return 1; } return n * fact(n - 1); }\nfunc main() int { print fact(5); return 0; }";
        assert_eq!(run(source), vec!["120"]);
    }
}
