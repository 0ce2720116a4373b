//! Structural invariants over a built function (§8 "Universal
//! invariants"): `IF`/`ELSE`/`ENDIF` and `LOOP`/`ENDLOOP` nest correctly,
//! `CBREAK`/`CONTINUE` appear only inside an open `LOOP`, and the
//! operand stack is balanced — each `IF` arm leaves the same net depth
//! as its sibling, each `LOOP` body returns to its starting depth, and
//! the function as a whole returns to zero.

use std::fmt;

use wabc_util::Symbol;

use crate::instr::Instruction;
use crate::program::{Function, Program};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// An `ELSE`/`ENDIF`/`ENDLOOP` with no matching opener, or an
    /// opener with no closer, inside `function`.
    UnbalancedNesting { function: Symbol, detail: String },
    /// An `IF`'s two arms, or a `LOOP`'s body, don't leave the stack at
    /// the same depth they started at.
    StackImbalance { function: Symbol, detail: String },
    /// `CBREAK`/`CONTINUE` outside any enclosing `LOOP`.
    LoopControlOutsideLoop { function: Symbol },
}

impl std::error::Error for VerifyError {}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::UnbalancedNesting { function, detail } => {
                write!(f, "{function}: unbalanced control-flow nesting: {detail}")
            }
            VerifyError::StackImbalance { function, detail } => {
                write!(f, "{function}: operand-stack imbalance: {detail}")
            }
            VerifyError::LoopControlOutsideLoop { function } => {
                write!(f, "{function}: `CBREAK`/`CONTINUE` outside of a `LOOP`")
            }
        }
    }
}

pub fn verify_program(program: &Program) -> Result<(), VerifyError> {
    for function in &program.functions {
        verify_function(function)?;
    }
    Ok(())
}

pub fn verify_function(func: &Function) -> Result<(), VerifyError> {
    let mut pos = 0;
    let delta = verify_region(func, &func.instructions, &mut pos, false)?;
    if pos != func.instructions.len() {
        return Err(VerifyError::UnbalancedNesting {
            function: func.name,
            detail: "trailing `ELSE`/`ENDIF`/`ENDLOOP` with no opener".to_string(),
        });
    }
    if delta != 0 {
        return Err(VerifyError::StackImbalance {
            function: func.name,
            detail: format!("function body leaves the stack at depth {delta}, expected 0"),
        });
    }
    Ok(())
}

/// Walks a flat region until its terminator (an `ELSE`/`ENDIF`/`ENDLOOP`
/// belonging to an enclosing opener, or the end of the instruction
/// list), returning the region's net operand-stack delta.
fn verify_region(func: &Function, instrs: &[Instruction], pos: &mut usize, in_loop: bool) -> Result<i64, VerifyError> {
    let mut depth: i64 = 0;
    while *pos < instrs.len() {
        match &instrs[*pos] {
            Instruction::Else | Instruction::EndIf | Instruction::EndLoop => return Ok(depth),
            Instruction::If => {
                depth += instrs[*pos].stack_delta();
                *pos += 1;
                let then_delta = verify_region(func, instrs, pos, in_loop)?;
                expect(func, instrs, *pos, "ELSE", matches!(instrs.get(*pos), Some(Instruction::Else)))?;
                *pos += 1;
                let else_delta = verify_region(func, instrs, pos, in_loop)?;
                expect(func, instrs, *pos, "ENDIF", matches!(instrs.get(*pos), Some(Instruction::EndIf)))?;
                *pos += 1;
                if then_delta != else_delta {
                    return Err(VerifyError::StackImbalance {
                        function: func.name,
                        detail: format!("IF arms leave different stack depths ({then_delta} vs {else_delta})"),
                    });
                }
                depth += then_delta;
            }
            Instruction::Loop => {
                *pos += 1;
                let body_delta = verify_region(func, instrs, pos, true)?;
                expect(func, instrs, *pos, "ENDLOOP", matches!(instrs.get(*pos), Some(Instruction::EndLoop)))?;
                *pos += 1;
                if body_delta != 0 {
                    return Err(VerifyError::StackImbalance {
                        function: func.name,
                        detail: format!("LOOP body leaves the stack at depth {body_delta}, expected 0"),
                    });
                }
            }
            Instruction::CBreak | Instruction::Continue => {
                if !in_loop {
                    return Err(VerifyError::LoopControlOutsideLoop { function: func.name });
                }
                depth += instrs[*pos].stack_delta();
                *pos += 1;
            }
            other => {
                depth += other.stack_delta();
                *pos += 1;
            }
        }
    }
    Ok(depth)
}

fn expect(func: &Function, instrs: &[Instruction], pos: usize, want: &str, found: bool) -> Result<(), VerifyError> {
    if found {
        return Ok(());
    }
    let saw = instrs.get(pos).map(|i| i.to_string()).unwrap_or_else(|| "end of function".to_string());
    Err(VerifyError::UnbalancedNesting { function: func.name, detail: format!("expected {want}, found {saw}") })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabc_par::ast::Type;
    use wabc_util::Symbol;

    fn func(instructions: Vec<Instruction>) -> Function {
        Function { name: Symbol::intern("f"), params: Vec::new(), return_type: Type::Int, instructions }
    }

    #[test]
    fn balanced_if_passes() {
        let f = func(vec![
            Instruction::ConstB(true),
            Instruction::If,
            Instruction::ConstI(1),
            Instruction::Else,
            Instruction::ConstI(2),
            Instruction::EndIf,
            Instruction::Drop,
            Instruction::ConstI(0),
            Instruction::Return,
        ]);
        verify_function(&f).unwrap();
    }

    #[test]
    fn mismatched_if_arms_rejected() {
        let f = func(vec![
            Instruction::ConstB(true),
            Instruction::If,
            Instruction::ConstI(1),
            Instruction::Else,
            Instruction::EndIf,
            Instruction::Return,
        ]);
        assert!(matches!(verify_function(&f), Err(VerifyError::StackImbalance { .. })));
    }

    #[test]
    fn break_outside_loop_rejected() {
        let f = func(vec![Instruction::ConstB(true), Instruction::CBreak, Instruction::ConstI(0), Instruction::Return]);
        assert!(matches!(verify_function(&f), Err(VerifyError::LoopControlOutsideLoop { .. })));
    }

    #[test]
    fn loop_body_must_be_stack_neutral() {
        let f = func(vec![
            Instruction::Loop,
            Instruction::ConstB(false),
            Instruction::CBreak,
            Instruction::ConstI(1), // leaks a value into the next iteration
            Instruction::EndLoop,
            Instruction::ConstI(0),
            Instruction::Return,
        ]);
        assert!(matches!(verify_function(&f), Err(VerifyError::StackImbalance { .. })));
    }

    #[test]
    fn unbalanced_nesting_rejected() {
        let f = func(vec![Instruction::If, Instruction::ConstI(0), Instruction::Return]);
        assert!(matches!(verify_function(&f), Err(VerifyError::UnbalancedNesting { .. })));
    }
}
