//! Full lex → parse → sem → irgen pipeline through `Session`, plus the
//! determinism and diagnostic-rendering invariants (§8 "Universal
//! invariants", §10.4).

use wabc_drv::{Config, Session};

#[test]
fn well_formed_program_compiles_with_no_diagnostics() {
    let mut session = Session::new(Config::default());
    let output = session.compile_str("func add(a int, b int) int { return a + b; }\nprint add(2, 3);").unwrap();
    assert!(!session.has_errors());
    assert!(output.ir.is_some());
}

#[test]
fn pipeline_stops_before_sem_on_parse_errors() {
    let mut session = Session::new(Config::default());
    // Missing terminating `;` is recoverable at the lex/parse boundary,
    // but chained relational operators are rejected by the parser itself.
    let output = session.compile_file("chained.wb", "print 1 < 2 < 3;").unwrap();
    assert!(session.has_errors());
    assert!(output.ir.is_none());
    assert!(output.symtab.is_none());
}

#[test]
fn diagnostics_survive_across_multiple_compiles_on_one_session() {
    let mut session = Session::new(Config::default());
    session.compile_file("a.wb", "print 1 < 2 < 3;").unwrap();
    let after_first = session.diagnostics().len();
    assert!(after_first > 0);
    session.compile_file("b.wb", "print 4 < 5 < 6;").unwrap();
    assert!(session.diagnostics().len() > after_first);
}

#[test]
fn two_compilations_of_the_same_source_serialize_identically() {
    let source = "\
        var total int = 0;\n\
        func accumulate(n int) int {\n\
            var i int = 0;\n\
            while i < n {\n\
                total = total + i;\n\
                i = i + 1;\n\
            }\n\
            return total;\n\
        }\n\
        func main() int { return accumulate(5); }\n\
    ";
    let mut a = Session::new(Config::default());
    let mut b = Session::new(Config::default());
    let ir_a = a.compile_str(source).unwrap().ir.unwrap();
    let ir_b = b.compile_str(source).unwrap().ir.unwrap();
    assert_eq!(ir_a.serialize(), ir_b.serialize());
}

#[test]
fn serialized_ir_names_every_function_once() {
    let mut session = Session::new(Config::default());
    let output = session.compile_str("func helper() int { return 1; }\nfunc main() int { return helper(); }").unwrap();
    let ir = output.ir.unwrap();
    let serialized = ir.serialize();
    assert_eq!(serialized.matches("FUNC helper").count(), 1);
    assert_eq!(serialized.matches("FUNC main").count(), 1);
    assert_eq!(serialized.matches("FUNC __init").count(), 1);
}
