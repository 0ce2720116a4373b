//! End-to-end lex → parse → sem → irgen tests (§8 "Testable properties"
//! and the concrete scenarios): every example compiles to verified IR,
//! and the emitted instruction stream matches the emission rules.

use wabc_ir::{verify_program, Builder, Instruction, Width};
use wabc_par::Parser;
use wabc_util::{FileId, Handler};

fn build(source: &str) -> wabc_ir::Program {
    let handler = Handler::new();
    let program = Parser::parse_str(source, FileId::DUMMY, &handler);
    assert!(!handler.has_errors(), "parse errors: {:?}", handler.diagnostics());
    let analysis = wabc_sem::analyze(&program, &handler);
    assert!(!handler.has_errors(), "sem errors: {:?}", handler.diagnostics());
    let ir = Builder::build(&program, &analysis.types);
    verify_program(&ir).expect("built IR should satisfy the structural invariants");
    ir
}

fn init_of<'a>(ir: &'a wabc_ir::Program) -> &'a wabc_ir::Function {
    ir.functions.iter().find(|f| f.name.as_str() == "__init").unwrap()
}

fn func<'a>(ir: &'a wabc_ir::Program, name: &str) -> &'a wabc_ir::Function {
    ir.functions.iter().find(|f| f.name.as_str() == name).unwrap_or_else(|| panic!("no function named {name}"))
}

#[test]
fn empty_program_synthesizes_main() {
    let ir = build("");
    assert!(ir.globals.is_empty());
    let main = func(&ir, "main");
    assert_eq!(main.instructions, vec![Instruction::ConstI(0), Instruction::Return]);
}

#[test]
fn global_var_decl_emits_global_decl_and_init_assignment() {
    let ir = build("var total int = 0;\nfunc main() int { return total; }");
    assert_eq!(ir.globals.len(), 1);
    match &ir.globals[0] {
        Instruction::GlobalDecl(name, ty) => {
            assert_eq!(name.as_str(), "total");
            assert_eq!(*ty, wabc_par::ast::Type::Int);
        }
        other => panic!("expected GlobalDecl, found {other:?}"),
    }
    let init = init_of(&ir);
    assert!(init.instructions.contains(&Instruction::ConstI(0)));
    assert!(init.instructions.iter().any(|i| matches!(i, Instruction::GlobalSet(n) if n.as_str() == "total")));
}

#[test]
fn arithmetic_uses_width_suffixed_instructions() {
    let ir = build("func main() int { return 2 + 3 * 4; }");
    let main = func(&ir, "main");
    assert!(main.instructions.contains(&Instruction::Mul(Width::I)));
    assert!(main.instructions.contains(&Instruction::Add(Width::I)));
}

#[test]
fn logical_and_lowers_to_short_circuit_if() {
    let ir = build("func main() int { if true && false { return 1; } return 0; }");
    let main = func(&ir, "main");
    // `&&` never emits the bare `AND` instruction.
    assert!(!main.instructions.contains(&Instruction::And));
    assert!(main.instructions.contains(&Instruction::If));
    assert!(main.instructions.contains(&Instruction::ConstB(false)));
}

#[test]
fn while_loop_emits_structured_markers() {
    let ir = build("func main() int { var i int = 0; while i < 10 { i = i + 1; } return i; }");
    let main = func(&ir, "main");
    assert!(main.instructions.contains(&Instruction::Loop));
    assert!(main.instructions.contains(&Instruction::CBreak));
    assert!(main.instructions.contains(&Instruction::EndLoop));
    assert!(main.instructions.contains(&Instruction::Not));
}

#[test]
fn break_statement_pushes_unconditional_guard() {
    let ir = build("func main() int { while true { break; } return 0; }");
    let main = func(&ir, "main");
    // Two CBREAKs: the loop's own condition guard and the `break`'s.
    let cbreaks = main.instructions.iter().filter(|i| matches!(i, Instruction::CBreak)).count();
    assert_eq!(cbreaks, 2);
}

#[test]
fn shadowed_locals_get_distinct_slot_names() {
    let source = "func main() int { var x int = 1; if true { var x int = 2; print x; } return x; }";
    let ir = build(source);
    let main = func(&ir, "main");
    let decl_names: Vec<_> = main
        .instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::LocalDecl(n, _) => Some(n.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(decl_names.len(), 2);
    assert_ne!(decl_names[0], decl_names[1]);
}

#[test]
fn call_statement_drops_its_unused_result() {
    let source = "import func noop() int;\nfunc main() int { noop(); return 0; }";
    let ir = build(source);
    let main = func(&ir, "main");
    let call_pos = main.instructions.iter().position(|i| matches!(i, Instruction::Call(..))).unwrap();
    assert_eq!(main.instructions[call_pos + 1], Instruction::Drop);
}

#[test]
fn memory_load_store_round_trip() {
    let ir = build("func main() int { `0 = 42; return `0; }");
    let main = func(&ir, "main");
    assert!(main.instructions.contains(&Instruction::Poke(Width::I)));
    assert!(main.instructions.contains(&Instruction::Peek(Width::I)));
}

#[test]
fn cast_emits_conversion_instruction() {
    let ir = build("func main() int { return int(3.5); }");
    let main = func(&ir, "main");
    assert!(main.instructions.contains(&Instruction::FtoI));
}

#[test]
fn recursive_function_calls_itself_by_name() {
    let source = "func fact(n int) int { if n <= 1 { return 1; } return n * fact(n - 1); }";
    let ir = build(source);
    let fact = func(&ir, "fact");
    assert!(fact.instructions.iter().any(|i| matches!(i, Instruction::Call(n, 1) if n.as_str() == "fact")));
}
